use comfy_table::{Cell, Table};

use crate::db::{get_connection, DB_FILE};
use crate::error::Result;
use crate::repo;
use crate::settings::get_data_dir;

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let sp = repo::add_subparish(&conn, name)?;
    println!("Added sub-parish: {}", sp.name);
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let subparishes = repo::list_subparishes(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "BECs", "Faithful"]);
    for sp in &subparishes {
        let becs: i64 = conn.query_row(
            "SELECT count(*) FROM becs WHERE subparish_id = ?1",
            [sp.id],
            |r| r.get(0),
        )?;
        let members: i64 = conn.query_row(
            "SELECT count(*) FROM faithful f JOIN becs b ON f.bec_id = b.id \
             WHERE b.subparish_id = ?1",
            [sp.id],
            |r| r.get(0),
        )?;
        table.add_row(vec![
            Cell::new(sp.id),
            Cell::new(&sp.name),
            Cell::new(becs),
            Cell::new(members),
        ]);
    }
    println!("Sub-parishes\n{table}");
    Ok(())
}

pub fn rename(name: &str, to: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    repo::rename_subparish(&conn, name, to)?;
    println!("Renamed sub-parish '{name}' to '{to}'");
    Ok(())
}
