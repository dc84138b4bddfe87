use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Result, VergerError};
use crate::models::{cents_from_decimal, decimal_from_cents, Bec, Contribution, SubParish};

// ---------------------------------------------------------------------------
// Sub-parishes
// ---------------------------------------------------------------------------

pub fn add_subparish(conn: &Connection, name: &str) -> Result<SubParish> {
    let name = name.trim();
    if name.is_empty() {
        return Err(VergerError::InvalidArgument(
            "sub-parish name cannot be empty".to_string(),
        ));
    }
    conn.execute("INSERT INTO subparishes (name) VALUES (?1)", [name])?;
    let id = conn.last_insert_rowid();
    debug!(id, name, "created sub-parish");
    Ok(SubParish { id, name: name.to_string() })
}

pub fn rename_subparish(conn: &Connection, name: &str, new_name: &str) -> Result<()> {
    let sp = find_subparish(conn, name)?;
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(VergerError::InvalidArgument(
            "sub-parish name cannot be empty".to_string(),
        ));
    }
    conn.execute(
        "UPDATE subparishes SET name = ?1 WHERE id = ?2",
        params![new_name, sp.id],
    )?;
    Ok(())
}

pub fn find_subparish(conn: &Connection, name: &str) -> Result<SubParish> {
    conn.query_row(
        "SELECT id, name FROM subparishes WHERE name = ?1",
        [name],
        |row| {
            Ok(SubParish {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| VergerError::UnknownSubParish(name.to_string()))
}

pub fn list_subparishes(conn: &Connection) -> Result<Vec<SubParish>> {
    let mut stmt = conn.prepare("SELECT id, name FROM subparishes ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(SubParish {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// BECs
// ---------------------------------------------------------------------------

pub fn add_bec(conn: &Connection, subparish_name: &str, name: &str) -> Result<Bec> {
    let sp = find_subparish(conn, subparish_name)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(VergerError::InvalidArgument(
            "BEC name cannot be empty".to_string(),
        ));
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM becs WHERE name = ?1 AND subparish_id = ?2",
            params![name, sp.id],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(VergerError::InvalidArgument(format!(
            "a BEC named '{name}' already exists in sub-parish '{}'",
            sp.name
        )));
    }
    conn.execute(
        "INSERT INTO becs (name, subparish_id) VALUES (?1, ?2)",
        params![name, sp.id],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, name, subparish = %sp.name, "created BEC");
    Ok(Bec {
        id,
        name: name.to_string(),
        subparish_id: sp.id,
    })
}

pub fn find_bec(conn: &Connection, subparish_name: &str, name: &str) -> Result<Bec> {
    let sp = find_subparish(conn, subparish_name)?;
    conn.query_row(
        "SELECT id, name, subparish_id FROM becs WHERE name = ?1 AND subparish_id = ?2",
        params![name, sp.id],
        |row| {
            Ok(Bec {
                id: row.get(0)?,
                name: row.get(1)?,
                subparish_id: row.get(2)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| VergerError::UnknownBec(format!("{name} (in {subparish_name})")))
}

pub fn rename_bec(
    conn: &Connection,
    subparish_name: &str,
    name: &str,
    new_name: &str,
) -> Result<()> {
    let bec = find_bec(conn, subparish_name, name)?;
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(VergerError::InvalidArgument(
            "BEC name cannot be empty".to_string(),
        ));
    }
    let taken: Option<i64> = conn
        .query_row(
            "SELECT id FROM becs WHERE name = ?1 AND subparish_id = ?2 AND id != ?3",
            params![new_name, bec.subparish_id, bec.id],
            |row| row.get(0),
        )
        .optional()?;
    if taken.is_some() {
        return Err(VergerError::InvalidArgument(format!(
            "a BEC named '{new_name}' already exists in sub-parish '{subparish_name}'"
        )));
    }
    conn.execute(
        "UPDATE becs SET name = ?1 WHERE id = ?2",
        params![new_name, bec.id],
    )?;
    Ok(())
}

/// Delete a BEC together with its faithful and their contributions.
/// Child rows are removed explicitly inside one transaction; the schema
/// carries no cascade semantics.
pub fn delete_bec(conn: &mut Connection, subparish_name: &str, name: &str) -> Result<()> {
    let bec = find_bec(conn, subparish_name, name)?;
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM contributions WHERE faithful_id IN \
         (SELECT id FROM faithful WHERE bec_id = ?1)",
        [bec.id],
    )?;
    tx.execute("DELETE FROM faithful WHERE bec_id = ?1", [bec.id])?;
    tx.execute("DELETE FROM becs WHERE id = ?1", [bec.id])?;
    tx.commit()?;
    debug!(id = bec.id, name, "deleted BEC and its members");
    Ok(())
}

/// A BEC with its sub-parish name, for listings.
pub struct BecRow {
    pub id: i64,
    pub name: String,
    pub subparish_name: String,
    pub member_count: i64,
}

pub fn list_becs(conn: &Connection, subparish_name: Option<&str>) -> Result<Vec<BecRow>> {
    let (clause, params_vec): (&str, Vec<i64>) = match subparish_name {
        Some(sp_name) => {
            let sp = find_subparish(conn, sp_name)?;
            ("WHERE b.subparish_id = ?1 ", vec![sp.id])
        }
        None => ("", Vec::new()),
    };
    let sql = format!(
        "SELECT b.id, b.name, s.name, \
         (SELECT count(*) FROM faithful f WHERE f.bec_id = b.id) \
         FROM becs b JOIN subparishes s ON b.subparish_id = s.id \
         {clause}ORDER BY s.name, b.name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec), |row| {
        Ok(BecRow {
            id: row.get(0)?,
            name: row.get(1)?,
            subparish_name: row.get(2)?,
            member_count: row.get(3)?,
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Faithful
// ---------------------------------------------------------------------------

pub struct NewFaithful<'a> {
    pub name: &'a str,
    pub contact_number: Option<&'a str>,
    pub address: Option<&'a str>,
    pub baptism_year: Option<&'a str>,
    pub occupation: Option<&'a str>,
    pub bec_id: i64,
}

fn check_faithful_name(
    conn: &Connection,
    name: &str,
    bec_id: i64,
    exclude_id: Option<i64>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(VergerError::InvalidArgument(
            "faithful name cannot be empty".to_string(),
        ));
    }
    let duplicate: Option<i64> = conn
        .query_row(
            "SELECT id FROM faithful WHERE name = ?1 AND bec_id = ?2 AND id != ?3",
            params![name.trim(), bec_id, exclude_id.unwrap_or(-1)],
            |row| row.get(0),
        )
        .optional()?;
    if duplicate.is_some() {
        return Err(VergerError::InvalidArgument(format!(
            "a faithful named '{}' already exists in this BEC",
            name.trim()
        )));
    }
    Ok(())
}

fn bec_exists(conn: &Connection, bec_id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM becs WHERE id = ?1", [bec_id], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

pub fn add_faithful(conn: &Connection, new: &NewFaithful) -> Result<i64> {
    if !bec_exists(conn, new.bec_id)? {
        return Err(VergerError::UnknownBec(format!("id {}", new.bec_id)));
    }
    check_faithful_name(conn, new.name, new.bec_id, None)?;
    conn.execute(
        "INSERT INTO faithful (name, contact_number, address, baptism_year, occupation, bec_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.name.trim(),
            new.contact_number,
            new.address,
            new.baptism_year,
            new.occupation,
            new.bec_id
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, name = new.name, "registered faithful");
    Ok(id)
}

/// A faithful with resolved BEC/sub-parish names, for listings.
pub struct FaithfulRow {
    pub id: i64,
    pub name: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub baptism_year: Option<String>,
    pub occupation: Option<String>,
    pub bec_id: i64,
    pub bec_name: String,
    pub subparish_name: String,
}

const FAITHFUL_SELECT: &str =
    "SELECT f.id, f.name, f.contact_number, f.address, f.baptism_year, f.occupation, \
     f.bec_id, b.name, s.name \
     FROM faithful f \
     JOIN becs b ON f.bec_id = b.id \
     JOIN subparishes s ON b.subparish_id = s.id";

fn map_faithful_row(row: &rusqlite::Row) -> rusqlite::Result<FaithfulRow> {
    Ok(FaithfulRow {
        id: row.get(0)?,
        name: row.get(1)?,
        contact_number: row.get(2)?,
        address: row.get(3)?,
        baptism_year: row.get(4)?,
        occupation: row.get(5)?,
        bec_id: row.get(6)?,
        bec_name: row.get(7)?,
        subparish_name: row.get(8)?,
    })
}

pub fn get_faithful(conn: &Connection, id: i64) -> Result<FaithfulRow> {
    let sql = format!("{FAITHFUL_SELECT} WHERE f.id = ?1");
    conn.query_row(&sql, [id], map_faithful_row)
        .optional()?
        .ok_or_else(|| VergerError::UnknownFaithful(format!("id {id}")))
}

pub fn list_faithful(conn: &Connection) -> Result<Vec<FaithfulRow>> {
    let sql = format!("{FAITHFUL_SELECT} ORDER BY f.name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_faithful_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn list_faithful_by_bec(conn: &Connection, bec_id: i64) -> Result<Vec<FaithfulRow>> {
    let sql = format!("{FAITHFUL_SELECT} WHERE f.bec_id = ?1 ORDER BY f.name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([bec_id], map_faithful_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub fn list_faithful_by_subparish(conn: &Connection, subparish_id: i64) -> Result<Vec<FaithfulRow>> {
    let sql = format!("{FAITHFUL_SELECT} WHERE b.subparish_id = ?1 ORDER BY f.name");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([subparish_id], map_faithful_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Case-insensitive substring search on member names.
pub fn search_faithful(conn: &Connection, query: &str) -> Result<Vec<FaithfulRow>> {
    if query.trim().is_empty() {
        return list_faithful(conn);
    }
    let sql = format!("{FAITHFUL_SELECT} WHERE f.name LIKE ?1 COLLATE NOCASE ORDER BY f.name");
    let mut stmt = conn.prepare(&sql)?;
    let pattern = format!("%{}%", query.trim());
    let rows = stmt.query_map([pattern], map_faithful_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub struct FaithfulUpdate<'a> {
    pub name: Option<&'a str>,
    pub contact_number: Option<&'a str>,
    pub address: Option<&'a str>,
    pub baptism_year: Option<&'a str>,
    pub occupation: Option<&'a str>,
    pub bec_id: Option<i64>,
}

pub fn update_faithful(conn: &Connection, id: i64, update: &FaithfulUpdate) -> Result<()> {
    let current = get_faithful(conn, id)?;
    let bec_id = update.bec_id.unwrap_or(current.bec_id);
    if !bec_exists(conn, bec_id)? {
        return Err(VergerError::UnknownBec(format!("id {bec_id}")));
    }
    let name = update.name.unwrap_or(&current.name);
    check_faithful_name(conn, name, bec_id, Some(id))?;
    conn.execute(
        "UPDATE faithful SET name = ?1, contact_number = ?2, address = ?3, \
         baptism_year = ?4, occupation = ?5, bec_id = ?6 WHERE id = ?7",
        params![
            name.trim(),
            update.contact_number.map(str::to_string).or(current.contact_number),
            update.address.map(str::to_string).or(current.address),
            update.baptism_year.map(str::to_string).or(current.baptism_year),
            update.occupation.map(str::to_string).or(current.occupation),
            bec_id,
            id
        ],
    )?;
    Ok(())
}

/// Delete a faithful and, explicitly, their contributions.
pub fn delete_faithful(conn: &mut Connection, id: i64) -> Result<()> {
    get_faithful(conn, id)?;
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM contributions WHERE faithful_id = ?1", [id])?;
    tx.execute("DELETE FROM faithful WHERE id = ?1", [id])?;
    tx.commit()?;
    debug!(id, "deleted faithful and their contributions");
    Ok(())
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

pub struct NewContribution<'a> {
    pub faithful_id: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Reporting year; defaults to the calendar year of `date`.
    pub year: Option<i32>,
    pub notes: Option<&'a str>,
}

pub fn add_contribution(conn: &Connection, new: &NewContribution) -> Result<i64> {
    get_faithful(conn, new.faithful_id)?;
    let cents = cents_from_decimal(new.amount)?;
    let year = new.year.unwrap_or_else(|| new.date.year());
    conn.execute(
        "INSERT INTO contributions (faithful_id, year, amount_cents, date, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.faithful_id, year, cents, new.date, new.notes],
    )?;
    let id = conn.last_insert_rowid();
    debug!(id, faithful_id = new.faithful_id, year, "recorded contribution");
    Ok(id)
}

fn map_contribution(row: &rusqlite::Row) -> rusqlite::Result<Contribution> {
    let cents: i64 = row.get(3)?;
    Ok(Contribution {
        id: Some(row.get(0)?),
        faithful_id: row.get(1)?,
        year: row.get(2)?,
        amount: decimal_from_cents(cents),
        date: row.get(4)?,
        notes: row.get(5)?,
    })
}

pub fn get_contribution(conn: &Connection, id: i64) -> Result<Contribution> {
    conn.query_row(
        "SELECT id, faithful_id, year, amount_cents, date, notes \
         FROM contributions WHERE id = ?1",
        [id],
        map_contribution,
    )
    .optional()?
    .ok_or(VergerError::UnknownContribution(id))
}

/// All contributions for one member, most recent first.
pub fn list_contributions(conn: &Connection, faithful_id: i64) -> Result<Vec<Contribution>> {
    get_faithful(conn, faithful_id)?;
    let mut stmt = conn.prepare(
        "SELECT id, faithful_id, year, amount_cents, date, notes \
         FROM contributions WHERE faithful_id = ?1 ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map([faithful_id], map_contribution)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

pub struct ContributionUpdate<'a> {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub notes: Option<&'a str>,
}

pub fn update_contribution(conn: &Connection, id: i64, update: &ContributionUpdate) -> Result<()> {
    let current = get_contribution(conn, id)?;
    let amount = update.amount.unwrap_or(current.amount);
    let cents = cents_from_decimal(amount)?;
    let date = update.date.unwrap_or(current.date);
    let year = update.year.unwrap_or(current.year);
    conn.execute(
        "UPDATE contributions SET year = ?1, amount_cents = ?2, date = ?3, notes = ?4 \
         WHERE id = ?5",
        params![
            year,
            cents,
            date,
            update.notes.map(str::to_string).or(current.notes),
            id
        ],
    )?;
    Ok(())
}

pub fn delete_contribution(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM contributions WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(VergerError::UnknownContribution(id));
    }
    debug!(id, "deleted contribution");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seed_member(conn: &Connection) -> i64 {
        add_subparish(conn, "Musha").unwrap();
        let bec = add_bec(conn, "Musha", "St. Paul").unwrap();
        add_faithful(
            conn,
            &NewFaithful {
                name: "Jean Bosco",
                contact_number: Some("0788000001"),
                address: None,
                baptism_year: None,
                occupation: None,
                bec_id: bec.id,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_subparish_name_unique() {
        let (_dir, conn) = test_db();
        add_subparish(&conn, "Musha").unwrap();
        assert!(add_subparish(&conn, "Musha").is_err());
    }

    #[test]
    fn test_bec_requires_existing_subparish() {
        let (_dir, conn) = test_db();
        let err = add_bec(&conn, "Nowhere", "St. Paul").unwrap_err();
        assert!(matches!(err, VergerError::UnknownSubParish(_)));
    }

    #[test]
    fn test_bec_name_unique_within_subparish() {
        let (_dir, conn) = test_db();
        add_subparish(&conn, "Musha").unwrap();
        add_subparish(&conn, "Rugarama").unwrap();
        add_bec(&conn, "Musha", "St. Paul").unwrap();
        assert!(add_bec(&conn, "Musha", "St. Paul").is_err());
        // Same name in a different sub-parish is fine.
        add_bec(&conn, "Rugarama", "St. Paul").unwrap();
    }

    #[test]
    fn test_faithful_duplicate_name_in_bec_rejected() {
        let (_dir, conn) = test_db();
        let id = seed_member(&conn);
        let bec_id = get_faithful(&conn, id).unwrap().bec_id;
        let result = add_faithful(
            &conn,
            &NewFaithful {
                name: "Jean Bosco",
                contact_number: None,
                address: None,
                baptism_year: None,
                occupation: None,
                bec_id,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_same_name_allowed_in_other_bec() {
        let (_dir, conn) = test_db();
        seed_member(&conn);
        let other = add_bec(&conn, "Musha", "St. Agnes").unwrap();
        add_faithful(
            &conn,
            &NewFaithful {
                name: "Jean Bosco",
                contact_number: None,
                address: None,
                baptism_year: None,
                occupation: None,
                bec_id: other.id,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_contribution_year_defaults_from_date() {
        let (_dir, conn) = test_db();
        let member = seed_member(&conn);
        let id = add_contribution(
            &conn,
            &NewContribution {
                faithful_id: member,
                amount: "1000".parse().unwrap(),
                date: date("2023-06-15"),
                year: None,
                notes: None,
            },
        )
        .unwrap();
        assert_eq!(get_contribution(&conn, id).unwrap().year, 2023);
    }

    #[test]
    fn test_contribution_explicit_year_wins() {
        let (_dir, conn) = test_db();
        let member = seed_member(&conn);
        let id = add_contribution(
            &conn,
            &NewContribution {
                faithful_id: member,
                amount: "1000".parse().unwrap(),
                date: date("2024-01-10"),
                year: Some(2023),
                notes: Some("late payment for prior year"),
            },
        )
        .unwrap();
        assert_eq!(get_contribution(&conn, id).unwrap().year, 2023);
    }

    #[test]
    fn test_contribution_rejects_nonpositive_amount() {
        let (_dir, conn) = test_db();
        let member = seed_member(&conn);
        let result = add_contribution(
            &conn,
            &NewContribution {
                faithful_id: member,
                amount: Decimal::ZERO,
                date: date("2023-06-15"),
                year: None,
                notes: None,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_contribution_requires_existing_faithful() {
        let (_dir, conn) = test_db();
        let result = add_contribution(
            &conn,
            &NewContribution {
                faithful_id: 42,
                amount: "100".parse().unwrap(),
                date: date("2023-06-15"),
                year: None,
                notes: None,
            },
        );
        assert!(matches!(result, Err(VergerError::UnknownFaithful(_))));
    }

    #[test]
    fn test_list_contributions_most_recent_first() {
        let (_dir, conn) = test_db();
        let member = seed_member(&conn);
        for d in ["2023-01-01", "2024-03-01", "2023-07-01"] {
            add_contribution(
                &conn,
                &NewContribution {
                    faithful_id: member,
                    amount: "100".parse().unwrap(),
                    date: date(d),
                    year: None,
                    notes: None,
                },
            )
            .unwrap();
        }
        let rows = list_contributions(&conn, member).unwrap();
        let dates: Vec<String> = rows.iter().map(|c| c.date.to_string()).collect();
        assert_eq!(dates, ["2024-03-01", "2023-07-01", "2023-01-01"]);
    }

    #[test]
    fn test_delete_faithful_removes_own_contributions_only() {
        let (_dir, mut conn) = test_db();
        let member = seed_member(&conn);
        let bec_id = get_faithful(&conn, member).unwrap().bec_id;
        let other = add_faithful(
            &conn,
            &NewFaithful {
                name: "Marie Claire",
                contact_number: None,
                address: None,
                baptism_year: None,
                occupation: None,
                bec_id,
            },
        )
        .unwrap();
        for f in [member, other] {
            add_contribution(
                &conn,
                &NewContribution {
                    faithful_id: f,
                    amount: "250".parse().unwrap(),
                    date: date("2023-05-01"),
                    year: None,
                    notes: None,
                },
            )
            .unwrap();
        }
        delete_faithful(&mut conn, member).unwrap();
        assert!(get_faithful(&conn, member).is_err());
        assert_eq!(list_contributions(&conn, other).unwrap().len(), 1);
        let orphans: i64 = conn
            .query_row(
                "SELECT count(*) FROM contributions WHERE faithful_id = ?1",
                [member],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_delete_bec_removes_members_and_contributions() {
        let (_dir, mut conn) = test_db();
        let member = seed_member(&conn);
        add_contribution(
            &conn,
            &NewContribution {
                faithful_id: member,
                amount: "250".parse().unwrap(),
                date: date("2023-05-01"),
                year: None,
                notes: None,
            },
        )
        .unwrap();
        delete_bec(&mut conn, "Musha", "St. Paul").unwrap();
        let members: i64 =
            conn.query_row("SELECT count(*) FROM faithful", [], |r| r.get(0)).unwrap();
        let contribs: i64 =
            conn.query_row("SELECT count(*) FROM contributions", [], |r| r.get(0)).unwrap();
        assert_eq!(members, 0);
        assert_eq!(contribs, 0);
    }

    #[test]
    fn test_search_faithful_case_insensitive() {
        let (_dir, conn) = test_db();
        seed_member(&conn);
        let hits = search_faithful(&conn, "jean").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Jean Bosco");
        assert!(search_faithful(&conn, "zzz").unwrap().is_empty());
    }

    #[test]
    fn test_update_faithful_keeps_unset_fields() {
        let (_dir, conn) = test_db();
        let id = seed_member(&conn);
        update_faithful(
            &conn,
            id,
            &FaithfulUpdate {
                name: None,
                contact_number: None,
                address: Some("Gatsibo"),
                baptism_year: None,
                occupation: None,
                bec_id: None,
            },
        )
        .unwrap();
        let row = get_faithful(&conn, id).unwrap();
        assert_eq!(row.name, "Jean Bosco");
        assert_eq!(row.contact_number.as_deref(), Some("0788000001"));
        assert_eq!(row.address.as_deref(), Some("Gatsibo"));
    }
}
