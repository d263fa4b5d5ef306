use rusqlite::Connection;

use crate::aggregate::{line_totals, LineTotals};
use crate::classify::{classify_transaction, Classified};
use crate::error::{Result, TallyError};
use crate::models::{Line, Transaction};

// ---------------------------------------------------------------------------
// Shared fetch helpers
// ---------------------------------------------------------------------------

fn txn_from_row(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        line_id: row.get(2)?,
        mdn: row.get(3)?,
        provider: row.get(4)?,
        customer: row.get(5)?,
        cycle: row.get(6)?,
        note: row.get(7)?,
        activity_type: row.get(8)?,
        category: row.get(9)?,
        amount: row.get(10)?,
        transaction_date: row.get(11)?,
    })
}

const TXN_COLUMNS: &str = "id, user_id, line_id, mdn, provider, customer, cycle, note, \
                           activity_type, category, amount, transaction_date";

/// Classification is recomputed from the raw fields on every read; the
/// persisted category column only serves the ingest-time duplicate probe.
pub fn classify_stored(t: &Transaction) -> Classified {
    classify_transaction(&t.activity_type, &t.note, &t.cycle, t.amount)
}

/// A line's transactions, matched by line id or by service number. Rows
/// ingested before the line existed carry only the MDN, so both paths count.
fn transactions_for_line(conn: &Connection, line: &Line) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {TXN_COLUMNS} FROM transactions \
         WHERE user_id = ?1 AND (line_id = ?2 OR mdn = ?3) ORDER BY id"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![line.user_id, line.id, line.mdn], |row| {
            txn_from_row(row)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Line summaries
// ---------------------------------------------------------------------------

pub struct LineSummary {
    pub line: Line,
    pub transaction_count: usize,
    pub totals: LineTotals,
}

/// All of a user's lines with fresh totals, newest first, optionally
/// filtered by an MDN fragment.
pub fn get_line_summaries(
    conn: &Connection,
    user_id: i64,
    search: Option<&str>,
) -> Result<Vec<LineSummary>> {
    let mut sql = String::from(
        "SELECT id, user_id, mdn, customer, provider, status FROM lines WHERE user_id = ?1",
    );
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(user_id)];
    if let Some(fragment) = search {
        sql.push_str(" AND mdn LIKE ?2");
        params.push(Box::new(format!("%{fragment}%")));
    }
    sql.push_str(" ORDER BY id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let lines: Vec<Line> = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(Line {
                id: row.get(0)?,
                user_id: row.get(1)?,
                mdn: row.get(2)?,
                customer: row.get(3)?,
                provider: row.get(4)?,
                status: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut summaries = Vec::with_capacity(lines.len());
    for line in lines {
        let txns = transactions_for_line(conn, &line)?;
        let classified: Vec<Classified> = txns.iter().map(classify_stored).collect();
        summaries.push(LineSummary {
            transaction_count: txns.len(),
            totals: line_totals(&classified),
            line,
        });
    }
    Ok(summaries)
}

// ---------------------------------------------------------------------------
// Line detail
// ---------------------------------------------------------------------------

pub struct LineDetail {
    pub line: Line,
    pub transactions: Vec<(Transaction, Classified)>,
    pub totals: LineTotals,
}

pub fn get_line_detail(conn: &Connection, user_id: i64, mdn: &str) -> Result<LineDetail> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, mdn, customer, provider, status FROM lines \
         WHERE user_id = ?1 AND mdn = ?2 ORDER BY id LIMIT 1",
    )?;
    let line = stmt
        .query_row(rusqlite::params![user_id, mdn], |row| {
            Ok(Line {
                id: row.get(0)?,
                user_id: row.get(1)?,
                mdn: row.get(2)?,
                customer: row.get(3)?,
                provider: row.get(4)?,
                status: row.get(5)?,
            })
        })
        .map_err(|_| TallyError::UnknownLine(mdn.to_string()))?;

    let txns = transactions_for_line(conn, &line)?;
    let classified: Vec<Classified> = txns.iter().map(classify_stored).collect();
    let totals = line_totals(&classified);
    Ok(LineDetail {
        line,
        transactions: txns.into_iter().zip(classified).collect(),
        totals,
    })
}

// ---------------------------------------------------------------------------
// Dashboard KPIs
// ---------------------------------------------------------------------------

pub struct DashboardStats {
    pub total_upfront: f64,
    pub total_monthly: f64,
    pub total_chargebacks: f64,
    pub active_lines: i64,
    pub line_count: i64,
    pub transaction_count: i64,
}

/// KPI totals across all of a user's transactions. Chargebacks are reported
/// as a positive magnitude.
pub fn get_dashboard(conn: &Connection, user_id: i64) -> Result<DashboardStats> {
    let sql = format!("SELECT {TXN_COLUMNS} FROM transactions WHERE user_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let txns: Vec<Transaction> = stmt
        .query_map([user_id], |row| txn_from_row(row))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut total_upfront = 0.0;
    let mut total_monthly = 0.0;
    let mut total_chargebacks = 0.0;
    for t in &txns {
        let c = classify_stored(t);
        if c.is_chargeback {
            total_chargebacks += c.amount.abs();
        } else if c.is_upfront {
            total_upfront += c.amount;
        } else if c.is_monthly {
            total_monthly += c.amount;
        }
    }

    let active_lines: i64 = conn.query_row(
        "SELECT count(*) FROM lines WHERE user_id = ?1 AND status = 'ACTIVE'",
        [user_id],
        |r| r.get(0),
    )?;
    let line_count: i64 = conn.query_row(
        "SELECT count(*) FROM lines WHERE user_id = ?1",
        [user_id],
        |r| r.get(0),
    )?;

    Ok(DashboardStats {
        total_upfront,
        total_monthly,
        total_chargebacks,
        active_lines,
        line_count,
        transaction_count: txns.len() as i64,
    })
}

// ---------------------------------------------------------------------------
// Recent activity
// ---------------------------------------------------------------------------

pub fn get_recent(conn: &Connection, user_id: i64, limit: usize) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {TXN_COLUMNS} FROM transactions WHERE user_id = ?1 \
         ORDER BY created_at DESC, id DESC LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, limit as i64], |row| {
            txn_from_row(row)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
