use crate::db::{get_connection, set_metadata, DB_FILE};
use crate::error::Result;
use crate::settings::get_data_dir;

pub fn set_name(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    set_metadata(&conn, "parish_name", name)?;
    println!("Parish name set to: {name}");
    Ok(())
}
