use comfy_table::{Cell, Table};
use regex::RegexBuilder;

use crate::db::{get_connection, DB_FILE};
use crate::error::{Result, VergerError};
use crate::repo::{self, FaithfulRow, FaithfulUpdate, NewFaithful};
use crate::settings::get_data_dir;

#[allow(clippy::too_many_arguments)]
pub fn add(
    name: &str,
    subparish: &str,
    bec: &str,
    contact: Option<&str>,
    address: Option<&str>,
    baptism_year: Option<&str>,
    occupation: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let b = repo::find_bec(&conn, subparish, bec)?;
    let id = repo::add_faithful(
        &conn,
        &NewFaithful {
            name,
            contact_number: contact,
            address,
            baptism_year,
            occupation,
            bec_id: b.id,
        },
    )?;
    println!("Registered faithful #{id}: {name} ({bec}, {subparish})");
    Ok(())
}

fn print_rows(title: &str, rows: &[FaithfulRow]) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Contact", "BEC", "Sub-parish", "Occupation"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.name),
            Cell::new(r.contact_number.as_deref().unwrap_or("")),
            Cell::new(&r.bec_name),
            Cell::new(&r.subparish_name),
            Cell::new(r.occupation.as_deref().unwrap_or("")),
        ]);
    }
    println!("{title}\n{table}");
}

pub fn list(subparish: Option<&str>, bec: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let rows = match (subparish, bec) {
        (Some(sp), Some(b)) => {
            let bec = repo::find_bec(&conn, sp, b)?;
            repo::list_faithful_by_bec(&conn, bec.id)?
        }
        (Some(sp), None) => {
            let sp = repo::find_subparish(&conn, sp)?;
            repo::list_faithful_by_subparish(&conn, sp.id)?
        }
        (None, Some(_)) => {
            return Err(VergerError::InvalidArgument(
                "--bec requires --subparish (BEC names are unique per sub-parish)".to_string(),
            ));
        }
        (None, None) => repo::list_faithful(&conn)?,
    };
    print_rows("Faithful", &rows);
    Ok(())
}

pub fn search(query: &str, regex: bool) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let rows = if regex {
        let re = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map_err(|e| VergerError::InvalidArgument(format!("invalid pattern: {e}")))?;
        repo::list_faithful(&conn)?
            .into_iter()
            .filter(|r| re.is_match(&r.name))
            .collect()
    } else {
        repo::search_faithful(&conn, query)?
    };
    print_rows(&format!("Faithful matching '{query}'"), &rows);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    id: i64,
    name: Option<&str>,
    contact: Option<&str>,
    address: Option<&str>,
    baptism_year: Option<&str>,
    occupation: Option<&str>,
    subparish: Option<&str>,
    bec: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let bec_id = match (subparish, bec) {
        (Some(sp), Some(b)) => Some(repo::find_bec(&conn, sp, b)?.id),
        (None, None) => None,
        _ => {
            return Err(VergerError::InvalidArgument(
                "moving a member requires both --subparish and --bec".to_string(),
            ));
        }
    };
    repo::update_faithful(
        &conn,
        id,
        &FaithfulUpdate {
            name,
            contact_number: contact,
            address,
            baptism_year,
            occupation,
            bec_id,
        },
    )?;
    println!("Updated faithful #{id}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let mut conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let row = repo::get_faithful(&conn, id)?;
    repo::delete_faithful(&mut conn, id)?;
    println!("Deleted faithful #{id} ({}) and their contributions", row.name);
    Ok(())
}
