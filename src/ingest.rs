use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::classify::classify;
use crate::error::{Result, TallyError};
use crate::models::RawRow;
use crate::normalize::{clean_customer, extract_mdn, parse_amount, parse_cycle_date};

// ---------------------------------------------------------------------------
// Header mapping
// ---------------------------------------------------------------------------

// Carrier exports rename columns across report generations; each logical
// field accepts the header spellings observed so far. Matching is done on
// uppercased, underscore-normalized header text.
const ACCOUNT_HEADERS: &[&str] = &[
    "ACCOUNT_NUM",
    "ACCOUNT_NUMBER",
    "ACCOUNT",
    "ACCT_NUM",
    "MDN",
    "PHONE",
    "PHONE_NUM",
    "PHONE_NUMBER",
    "MOBILE_NUMBER",
    "SUBSCRIBER_NUM",
];

const CUSTOMER_HEADERS: &[&str] = &[
    "CUSTOMER",
    "CUSTOMER_NAME",
    "CUST_NAME",
    "SUBSCRIBER_NAME",
    "SUBSCRIBER",
];

const PROVIDER_HEADERS: &[&str] = &["PROVIDER", "CARRIER", "CARRIER_NAME", "PLAN", "PRODUCT"];

const CYCLE_HEADERS: &[&str] = &[
    "CYCLE",
    "CYCLE_DATE",
    "BILL_CYCLE",
    "BILLING_CYCLE",
    "BILLING_PERIOD",
    "PERIOD",
    "COMMISSION_CYCLE",
];

const AMOUNT_HEADERS: &[&str] = &[
    "COMP_PAID",
    "COMP_AMT",
    "COMPENSATION",
    "COMMISSION",
    "COMMISSION_PAID",
    "AMOUNT",
    "AMT_PAID",
    "NET_COMP",
];

const NOTE_HEADERS: &[&str] = &["NOTE", "NOTES", "DESCRIPTION", "MEMO", "COMMENTS", "ACTIVITY_DESC"];

const ACTIVITY_HEADERS: &[&str] = &[
    "ACTIVITY_TYPE",
    "ACTIVITY",
    "TRANS_TYPE",
    "TRANSACTION_TYPE",
    "TYPE",
];

/// Column positions for one file, resolved from the header row once and
/// reused for every record. Account and amount are mandatory; the rest
/// default to empty fields.
#[derive(Debug)]
struct ColumnMap {
    account: usize,
    amount: usize,
    customer: Option<usize>,
    provider: Option<usize>,
    cycle: Option<usize>,
    note: Option<usize>,
    activity: Option<usize>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .trim_matches('"')
        .trim()
        .to_uppercase()
        .replace([' ', '-'], "_")
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&normalize_header(h).as_str()))
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let account = find_column(headers, ACCOUNT_HEADERS);
        let amount = find_column(headers, AMOUNT_HEADERS);
        match (account, amount) {
            (Some(account), Some(amount)) => Ok(Self {
                account,
                amount,
                customer: find_column(headers, CUSTOMER_HEADERS),
                provider: find_column(headers, PROVIDER_HEADERS),
                cycle: find_column(headers, CYCLE_HEADERS),
                note: find_column(headers, NOTE_HEADERS),
                activity: find_column(headers, ACTIVITY_HEADERS),
            }),
            _ => {
                let joined: Vec<String> = headers.iter().map(normalize_header).collect();
                Err(TallyError::MissingColumns(format!(
                    "no account/amount column in [{}]",
                    joined.join(", ")
                )))
            }
        }
    }

    fn row(&self, record: &csv::StringRecord) -> RawRow {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        RawRow {
            account: field(Some(self.account)),
            amount: field(Some(self.amount)),
            customer: field(self.customer),
            provider: field(self.provider),
            cycle: field(self.cycle),
            note: field(self.note),
            activity_type: field(self.activity),
        }
    }
}

// ---------------------------------------------------------------------------
// Store probes
// ---------------------------------------------------------------------------

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// Find the line a row belongs to, creating it when absent. Returns the line
/// id and whether it was created. When duplicate lines share one MDN (a known
/// data-quality condition), an exact provider+customer match wins; otherwise
/// the first match stands in.
fn resolve_line(
    conn: &Connection,
    user_id: i64,
    mdn: &str,
    customer: &str,
    provider: &str,
) -> Result<(i64, bool)> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, provider, customer FROM lines WHERE user_id = ?1 AND mdn = ?2 ORDER BY id",
    )?;
    let candidates: Vec<(i64, String, String)> = stmt
        .query_map(rusqlite::params![user_id, mdn], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if candidates.is_empty() {
        conn.execute(
            "INSERT INTO lines (user_id, mdn, customer, provider, status) VALUES (?1, ?2, ?3, ?4, 'ACTIVE')",
            rusqlite::params![user_id, mdn, customer, provider],
        )?;
        return Ok((conn.last_insert_rowid(), true));
    }

    let id = candidates
        .iter()
        .find(|(_, p, c)| p.as_str() == provider && c.as_str() == customer)
        .map(|(id, _, _)| *id)
        .unwrap_or(candidates[0].0);
    Ok((id, false))
}

fn is_duplicate_txn(
    conn: &Connection,
    user_id: i64,
    mdn: &str,
    cycle: &str,
    amount: f64,
    category: &str,
) -> Result<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM transactions \
         WHERE user_id = ?1 AND mdn = ?2 AND cycle = ?3 AND amount = ?4 AND category = ?5",
    )?;
    Ok(stmt.exists(rusqlite::params![user_id, mdn, cycle, amount, category])?)
}

// ---------------------------------------------------------------------------
// ingest_file
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub created: usize,
    pub updated: usize,
    pub transactions: usize,
    pub skipped: usize,
}

/// Run one commission report through the pipeline. Rows are processed
/// strictly in file order so the line-resolution and duplicate probes see the
/// effects of earlier rows in the same file. Row-level failures are counted
/// and never abort the batch; re-running the same file only adds skips.
pub fn ingest_file(conn: &Connection, user_id: i64, file_path: &Path) -> Result<IngestSummary> {
    let checksum = compute_checksum(file_path)?;

    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));

    let headers = rdr
        .headers()
        .map_err(|_| TallyError::EmptyFile(file_path.display().to_string()))?
        .clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TallyError::EmptyFile(file_path.display().to_string()));
    }
    let map = ColumnMap::resolve(&headers)?;

    let mut summary = IngestSummary::default();
    let mut row_count = 0usize;

    for result in rdr.records() {
        let Ok(record) = result else {
            summary.skipped += 1;
            continue;
        };
        row_count += 1;

        let row = map.row(&record);
        let Some(mdn) = extract_mdn(&row.account) else {
            eprintln!("Skipping row with no 10-digit service number: {:?}", row.account);
            summary.skipped += 1;
            continue;
        };

        let customer = clean_customer(&row.customer);
        let provider = row.provider.clone();
        let amount = parse_amount(&row.amount);
        let category = classify(&row.activity_type, &row.note, &row.cycle, amount);
        let transaction_date = parse_cycle_date(&row.cycle);

        let (line_id, created) = match resolve_line(conn, user_id, &mdn, &customer, &provider) {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("Skipping row for {mdn}: {e}");
                summary.skipped += 1;
                continue;
            }
        };
        if created {
            summary.created += 1;
        } else {
            summary.updated += 1;
        }

        match is_duplicate_txn(conn, user_id, &mdn, &row.cycle, amount, category.as_str()) {
            Ok(true) => {
                summary.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("Skipping row for {mdn}: {e}");
                summary.skipped += 1;
                continue;
            }
        }

        let inserted = conn.execute(
            "INSERT INTO transactions \
             (user_id, line_id, mdn, provider, customer, cycle, note, activity_type, category, amount, transaction_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                user_id,
                line_id,
                mdn,
                provider,
                customer,
                row.cycle,
                row.note,
                row.activity_type,
                category.as_str(),
                amount,
                transaction_date,
            ],
        );
        match inserted {
            Ok(_) => summary.transactions += 1,
            Err(e) => {
                eprintln!("Skipping row for {mdn}: {e}");
                summary.skipped += 1;
            }
        }
    }

    if row_count == 0 {
        return Err(TallyError::EmptyFile(file_path.display().to_string()));
    }

    conn.execute(
        "INSERT INTO ingests (user_id, filename, checksum, row_count, created, updated, transactions, skipped) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            user_id,
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            checksum,
            row_count as i64,
            summary.created as i64,
            summary.updated as i64,
            summary.transactions as i64,
            summary.skipped as i64,
        ],
    )?;

    Ok(summary)
}
