use rusqlite::Connection;

use crate::db::{create_user, find_user, get_connection, init_db};
use crate::error::Result;
use crate::settings::{get_data_dir, load_settings, save_settings};

const DEMO_USER: &str = "demo";

struct DemoLine {
    mdn: &'static str,
    customer: &'static str,
    provider: &'static str,
    status: &'static str,
}

const LINES: &[DemoLine] = &[
    DemoLine { mdn: "2025551234", customer: "Jane Doe", provider: "Verizon", status: "ACTIVE" },
    DemoLine { mdn: "3105559876", customer: "Alex Smith", provider: "AT&T", status: "ACTIVE" },
    DemoLine { mdn: "4155552468", customer: "Sam Lee", provider: "T-Mobile", status: "SUSPENDED" },
    DemoLine { mdn: "6175550042", customer: "Pat Murphy", provider: "Verizon", status: "INACTIVE" },
];

struct DemoTxn {
    mdn: &'static str,
    cycle: &'static str,
    note: &'static str,
    activity_type: &'static str,
    amount: f64,
}

const TXNS: &[DemoTxn] = &[
    DemoTxn { mdn: "2025551234", cycle: "09/2025", note: "Component:Upfront", activity_type: "ACT", amount: 150.00 },
    DemoTxn { mdn: "2025551234", cycle: "10/2025", note: "Monthly residual", activity_type: "RESIDUAL", amount: 12.50 },
    DemoTxn { mdn: "2025551234", cycle: "11/2025", note: "Monthly residual", activity_type: "RESIDUAL", amount: 12.50 },
    DemoTxn { mdn: "3105559876", cycle: "10/2025", note: "Product Type:Gross Adds", activity_type: "", amount: 225.00 },
    DemoTxn { mdn: "3105559876", cycle: "11/2025", note: "SPIF promo", activity_type: "SPIF", amount: 50.00 },
    DemoTxn { mdn: "4155552468", cycle: "10/2025", note: "New activation", activity_type: "ACT", amount: 175.00 },
    DemoTxn { mdn: "4155552468", cycle: "11/2025", note: "Chargeback early disconnect", activity_type: "DEACT", amount: -175.00 },
    DemoTxn { mdn: "6175550042", cycle: "11/2025", note: "Monthly residual", activity_type: "RESIDUAL", amount: 8.75 },
];

fn seed(conn: &Connection) -> Result<()> {
    let user_id = create_user(conn, DEMO_USER)?;

    for line in LINES {
        conn.execute(
            "INSERT INTO lines (user_id, mdn, customer, provider, status) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![user_id, line.mdn, line.customer, line.provider, line.status],
        )?;
    }

    for t in TXNS {
        let line_id: i64 = conn.query_row(
            "SELECT id FROM lines WHERE user_id = ?1 AND mdn = ?2",
            rusqlite::params![user_id, t.mdn],
            |r| r.get(0),
        )?;
        let (provider, customer) = LINES
            .iter()
            .find(|l| l.mdn == t.mdn)
            .map(|l| (l.provider, l.customer))
            .unwrap_or_default();
        let category = crate::classify::classify(t.activity_type, t.note, t.cycle, t.amount);
        let date = crate::normalize::parse_cycle_date(t.cycle);
        conn.execute(
            "INSERT INTO transactions \
             (user_id, line_id, mdn, provider, customer, cycle, note, activity_type, category, amount, transaction_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                user_id,
                line_id,
                t.mdn,
                provider,
                customer,
                t.cycle,
                t.note,
                t.activity_type,
                category.as_str(),
                t.amount,
                date,
            ],
        )?;
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let db_path = get_data_dir().join("linetally.db");
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;

    if find_user(&conn, DEMO_USER).is_ok() {
        println!("Demo data already loaded. Try `linetally lines --user {DEMO_USER}`.");
        return Ok(());
    }
    seed(&conn)?;

    let mut settings = load_settings();
    settings.user = DEMO_USER.to_string();
    save_settings(&settings)?;

    println!("Seeded demo data for user '{DEMO_USER}'.");
    println!("Try `linetally lines` or `linetally report summary`.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_creates_lines_and_transactions() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        seed(&conn).unwrap();

        let lines: i64 = conn.query_row("SELECT count(*) FROM lines", [], |r| r.get(0)).unwrap();
        let txns: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(lines as usize, LINES.len());
        assert_eq!(txns as usize, TXNS.len());
    }

    #[test]
    fn test_seeded_chargeback_is_deact() {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        seed(&conn).unwrap();

        let category: String = conn
            .query_row(
                "SELECT category FROM transactions WHERE amount < 0",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(category, "DEACT");
    }
}
