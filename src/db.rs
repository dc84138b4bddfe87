use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const DB_FILE: &str = "verger.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS subparishes (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS becs (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    subparish_id INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (subparish_id) REFERENCES subparishes(id),
    UNIQUE (name, subparish_id)
);

CREATE TABLE IF NOT EXISTS faithful (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    contact_number TEXT,
    address TEXT,
    baptism_year TEXT,
    occupation TEXT,
    bec_id INTEGER NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (bec_id) REFERENCES becs(id)
);

CREATE TABLE IF NOT EXISTS contributions (
    id INTEGER PRIMARY KEY,
    faithful_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    amount_cents INTEGER NOT NULL,
    date TEXT NOT NULL,
    notes TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (faithful_id) REFERENCES faithful(id)
);

CREATE INDEX IF NOT EXISTS idx_contributions_faithful ON contributions(faithful_id);
CREATE INDEX IF NOT EXISTS idx_contributions_year ON contributions(year);

CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
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

pub fn get_metadata(conn: &Connection, key: &str) -> Option<String> {
    conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .ok()
}

pub fn set_metadata(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO metadata (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["subparishes", "becs", "faithful", "contributions", "metadata"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let (_dir, conn) = test_db();
        let result = conn.execute(
            "INSERT INTO becs (name, subparish_id) VALUES ('Orphan', 999)",
            [],
        );
        assert!(result.is_err(), "insert with dangling FK should fail");
    }

    #[test]
    fn test_metadata_roundtrip() {
        let (_dir, conn) = test_db();
        assert_eq!(get_metadata(&conn, "parish_name"), None);
        set_metadata(&conn, "parish_name", "St. Joseph Parish").unwrap();
        assert_eq!(
            get_metadata(&conn, "parish_name").as_deref(),
            Some("St. Joseph Parish")
        );
        set_metadata(&conn, "parish_name", "Holy Family Parish").unwrap();
        assert_eq!(
            get_metadata(&conn, "parish_name").as_deref(),
            Some("Holy Family Parish")
        );
    }
}
