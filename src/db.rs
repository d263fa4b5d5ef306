use std::path::Path;

use rusqlite::Connection;

use crate::error::{Result, TallyError};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS lines (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    mdn TEXT NOT NULL,
    customer TEXT NOT NULL DEFAULT '',
    provider TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'ACTIVE',
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_lines_user_mdn ON lines(user_id, mdn);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    line_id INTEGER,
    mdn TEXT NOT NULL,
    provider TEXT NOT NULL DEFAULT '',
    customer TEXT NOT NULL DEFAULT '',
    cycle TEXT NOT NULL DEFAULT '',
    note TEXT NOT NULL DEFAULT '',
    activity_type TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    amount REAL NOT NULL,
    transaction_date TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (line_id) REFERENCES lines(id)
);

CREATE INDEX IF NOT EXISTS idx_txns_dup_key
    ON transactions(user_id, mdn, cycle, amount, category);

CREATE TABLE IF NOT EXISTS ingests (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    filename TEXT NOT NULL,
    checksum TEXT,
    row_count INTEGER,
    created INTEGER DEFAULT 0,
    updated INTEGER DEFAULT 0,
    transactions INTEGER DEFAULT 0,
    skipped INTEGER DEFAULT 0,
    ingested_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (user_id) REFERENCES users(id)
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Resolve a user by name. Every ingest and report is scoped to one owning
/// user; an unknown name is a batch-level failure, not a per-row one.
pub fn find_user(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE name = ?1")?;
    stmt.query_row([name], |row| row.get(0))
        .map_err(|_| TallyError::UnknownUser(name.to_string()))
}

pub fn create_user(conn: &Connection, name: &str) -> Result<i64> {
    conn.execute("INSERT INTO users (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}
