use crate::db::get_connection;
use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join("linetally.db");

    println!(
        "User:       {}",
        if settings.user.is_empty() { "(not set)" } else { &settings.user }
    );
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let conn = get_connection(&db_path)?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let lines: i64 = conn.query_row("SELECT count(*) FROM lines", [], |r| r.get(0))?;
        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let ingests: i64 = conn.query_row("SELECT count(*) FROM ingests", [], |r| r.get(0))?;

        println!();
        println!("Users:         {users}");
        println!("Lines:         {lines}");
        println!("Transactions:  {transactions}");
        println!("Ingest runs:   {ingests}");
    } else {
        println!();
        println!("Database not found. Run `linetally init` to set up.");
    }

    Ok(())
}
