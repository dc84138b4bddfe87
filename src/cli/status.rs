use crate::db::{get_connection, get_metadata, DB_FILE};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let db_path = data_dir.join(DB_FILE);

    println!("User:       {}", if settings.user_name.is_empty() { "(not set)" } else { &settings.user_name });
    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;

        let parish = get_metadata(&conn, "parish_name");
        println!("Parish:     {}", parish.as_deref().unwrap_or("(not set)"));

        let subparishes: i64 = conn.query_row("SELECT count(*) FROM subparishes", [], |r| r.get(0))?;
        let becs: i64 = conn.query_row("SELECT count(*) FROM becs", [], |r| r.get(0))?;
        let members: i64 = conn.query_row("SELECT count(*) FROM faithful", [], |r| r.get(0))?;
        let contributions: i64 =
            conn.query_row("SELECT count(*) FROM contributions", [], |r| r.get(0))?;

        println!();
        println!("Sub-parishes:   {subparishes}");
        println!("BECs:           {becs}");
        println!("Faithful:       {members}");
        println!("Contributions:  {contributions}");
    } else {
        println!();
        println!("Database not found. Run `verger init` to set up.");
    }

    Ok(())
}
