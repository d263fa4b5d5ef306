use comfy_table::{Cell, Table};

use crate::db::{find_user, get_connection};
use crate::error::Result;
use crate::fmt::{mdn, money};
use crate::normalize::extract_mdn;
use crate::reports::get_line_detail;
use crate::settings::{get_data_dir, resolve_user_name};

use super::lines::status_label;

pub fn run(raw_mdn: &str, user: Option<&str>) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    // Accept formatted input like 202-555-1234.
    let key = extract_mdn(raw_mdn).unwrap_or_else(|| raw_mdn.to_string());
    let detail = get_line_detail(&conn, user_id, &key)?;

    println!("Line {}", mdn(&detail.line.mdn));
    println!("Customer:  {}", detail.line.customer);
    println!("Provider:  {}", detail.line.provider);
    println!("Status:    {}", detail.line.status);
    println!();

    let mut table = Table::new();
    table.set_header(vec!["Date", "Cycle", "Category", "Amount", "Note"]);
    for (txn, classified) in &detail.transactions {
        table.add_row(vec![
            Cell::new(txn.transaction_date.as_deref().unwrap_or("")),
            Cell::new(&txn.cycle),
            Cell::new(classified.category.as_str()),
            Cell::new(money(classified.amount)),
            Cell::new(&txn.note),
        ]);
    }
    println!("Transactions\n{table}");

    println!();
    println!("Upfront:      {}", money(detail.totals.upfront_total));
    println!("Monthly:      {}", money(detail.totals.monthly_total));
    println!("Chargebacks:  {}", money(detail.totals.chargebacks));
    println!("Net:          {}", money(detail.totals.net_total));
    println!("Payment:      {}", status_label(detail.totals.payment_status));
    Ok(())
}
