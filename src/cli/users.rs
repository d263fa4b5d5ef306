use comfy_table::{Cell, Table};

use crate::db::{create_user, get_connection};
use crate::error::Result;
use crate::settings::{get_data_dir, load_settings, save_settings};

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    create_user(&conn, name)?;

    let mut settings = load_settings();
    settings.user = name.to_string();
    save_settings(&settings)?;

    println!("Added user: {name} (now active)");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("linetally.db"))?;
    let active = load_settings().user;

    let mut stmt = conn.prepare(
        "SELECT u.id, u.name, \
                (SELECT count(*) FROM lines l WHERE l.user_id = u.id), \
                (SELECT count(*) FROM transactions t WHERE t.user_id = u.id) \
         FROM users u ORDER BY u.id",
    )?;
    let rows: Vec<(i64, String, i64, i64)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Lines", "Transactions", ""]);
    for (id, name, lines, txns) in rows {
        let marker = if name == active { "active" } else { "" };
        table.add_row(vec![
            Cell::new(id),
            Cell::new(name),
            Cell::new(lines),
            Cell::new(txns),
            Cell::new(marker),
        ]);
    }
    println!("Users\n{table}");
    Ok(())
}
