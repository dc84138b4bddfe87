use comfy_table::{Cell, Table};

use crate::db::{get_connection, DB_FILE};
use crate::error::Result;
use crate::repo;
use crate::settings::get_data_dir;

pub fn add(name: &str, subparish: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let bec = repo::add_bec(&conn, subparish, name)?;
    println!("Added BEC '{}' to sub-parish '{subparish}'", bec.name);
    Ok(())
}

pub fn list(subparish: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let becs = repo::list_becs(&conn, subparish)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Sub-parish", "Faithful"]);
    for bec in &becs {
        table.add_row(vec![
            Cell::new(bec.id),
            Cell::new(&bec.name),
            Cell::new(&bec.subparish_name),
            Cell::new(bec.member_count),
        ]);
    }
    println!("BECs\n{table}");
    Ok(())
}

pub fn rename(name: &str, subparish: &str, to: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    repo::rename_bec(&conn, subparish, name, to)?;
    println!("Renamed BEC '{name}' to '{to}'");
    Ok(())
}

pub fn delete(name: &str, subparish: &str) -> Result<()> {
    let mut conn = get_connection(&get_data_dir().join(DB_FILE))?;
    repo::delete_bec(&mut conn, subparish, name)?;
    println!("Deleted BEC '{name}' and its members from sub-parish '{subparish}'");
    Ok(())
}
