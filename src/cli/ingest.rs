use std::path::PathBuf;

use crate::db::{find_user, get_connection};
use crate::error::Result;
use crate::ingest::ingest_file;
use crate::settings::{get_data_dir, resolve_user_name};

pub fn run(file: &str, user: Option<&str>) -> Result<()> {
    let user_name = resolve_user_name(user)?;
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let user_id = find_user(&conn, &user_name)?;

    let summary = ingest_file(&conn, user_id, &PathBuf::from(file))?;

    println!(
        "{} transactions for {} new and {} existing lines ({} skipped)",
        summary.transactions, summary.created, summary.updated, summary.skipped
    );
    Ok(())
}
