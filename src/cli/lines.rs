use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::aggregate::PaymentStatus;
use crate::db::{find_user, get_connection};
use crate::error::Result;
use crate::fmt::{mdn, money};
use crate::reports::get_line_summaries;
use crate::settings::{get_data_dir, resolve_user_name};

pub fn status_label(status: PaymentStatus) -> String {
    match status {
        PaymentStatus::Complete => "complete".green().to_string(),
        PaymentStatus::Partial => "partial".yellow().to_string(),
        PaymentStatus::None => "none".red().to_string(),
    }
}

pub fn run(search: Option<&str>, user: Option<&str>) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    let summaries = get_line_summaries(&conn, user_id, search)?;
    if summaries.is_empty() {
        println!("No lines found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "MDN", "Customer", "Provider", "Status", "Txns", "Upfront", "Monthly", "Chargebacks",
        "Net", "Payment",
    ]);
    for s in &summaries {
        table.add_row(vec![
            Cell::new(mdn(&s.line.mdn)),
            Cell::new(&s.line.customer),
            Cell::new(&s.line.provider),
            Cell::new(&s.line.status),
            Cell::new(s.transaction_count),
            Cell::new(money(s.totals.upfront_total)),
            Cell::new(money(s.totals.monthly_total)),
            Cell::new(money(s.totals.chargebacks)),
            Cell::new(money(s.totals.net_total)),
            Cell::new(status_label(s.totals.payment_status)),
        ]);
    }
    println!("Lines ({})\n{table}", summaries.len());
    Ok(())
}
