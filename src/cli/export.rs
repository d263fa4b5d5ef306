use std::path::PathBuf;

use crate::db::{find_user, get_connection};
use crate::error::Result;
use crate::reports::get_line_summaries;
use crate::settings::{get_data_dir, resolve_user_name};

fn default_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir()
        .join("exports")
        .join(format!("lines-{date}.csv"))
}

/// Write per-line totals as CSV. Derived data only; every value is
/// recomputed from the transaction set at export time.
pub fn run(output: Option<String>, user: Option<&str>) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    let summaries = get_line_summaries(&conn, user_id, None)?;

    let path = output.map(PathBuf::from).unwrap_or_else(default_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(&path)?;
    wtr.write_record([
        "MDN",
        "Customer",
        "Provider",
        "Status",
        "Transactions",
        "Upfront",
        "Monthly",
        "Chargebacks",
        "Net",
        "Payment Status",
    ])?;
    for s in &summaries {
        wtr.write_record([
            s.line.mdn.as_str(),
            s.line.customer.as_str(),
            s.line.provider.as_str(),
            s.line.status.as_str(),
            &s.transaction_count.to_string(),
            &format!("{:.2}", s.totals.upfront_total),
            &format!("{:.2}", s.totals.monthly_total),
            &format!("{:.2}", s.totals.chargebacks),
            &format!("{:.2}", s.totals.net_total),
            s.totals.payment_status.as_str(),
        ])?;
    }
    wtr.flush()?;

    println!("Wrote {} lines to {}", summaries.len(), path.display());
    Ok(())
}
