use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::{find_user, get_connection};
use crate::error::Result;
use crate::fmt::{mdn, money};
use crate::reports::{classify_stored, get_dashboard, get_recent};
use crate::settings::{get_data_dir, resolve_user_name};

pub fn summary(user: Option<&str>) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    let stats = get_dashboard(&conn, user_id)?;

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Upfront Commissions"),
        Cell::new(money(stats.total_upfront).green().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Total Monthly Commissions"),
        Cell::new(money(stats.total_monthly).green().to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Total Chargebacks"),
        Cell::new(money(stats.total_chargebacks).red().to_string()),
    ]);
    table.add_row(vec![Cell::new("Active Lines"), Cell::new(stats.active_lines)]);
    table.add_row(vec![Cell::new("All Lines"), Cell::new(stats.line_count)]);
    table.add_row(vec![
        Cell::new("Transactions"),
        Cell::new(stats.transaction_count),
    ]);
    println!("Summary — {user_name}\n{table}");
    Ok(())
}

pub fn recent(user: Option<&str>, limit: usize) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    let txns = get_recent(&conn, user_id, limit)?;
    if txns.is_empty() {
        println!("No transactions yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["MDN", "Customer", "Category", "Amount", "Cycle"]);
    for t in &txns {
        let c = classify_stored(t);
        table.add_row(vec![
            Cell::new(mdn(&t.mdn)),
            Cell::new(&t.customer),
            Cell::new(c.category.as_str()),
            Cell::new(money(c.amount)),
            Cell::new(&t.cycle),
        ]);
    }
    println!("Recent Activity\n{table}");
    Ok(())
}
