use comfy_table::{Cell, Table};

use crate::cli::{parse_amount, parse_date};
use crate::db::{get_connection, DB_FILE};
use crate::error::Result;
use crate::fmt::money;
use crate::repo::{self, ContributionUpdate, NewContribution};
use crate::settings::get_data_dir;

pub fn add(
    faithful: i64,
    amount: &str,
    date: &str,
    year: Option<i32>,
    notes: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let amount = parse_amount(amount)?;
    let date = parse_date(date)?;
    let id = repo::add_contribution(
        &conn,
        &NewContribution {
            faithful_id: faithful,
            amount,
            date,
            year,
            notes,
        },
    )?;
    let saved = repo::get_contribution(&conn, id)?;
    println!(
        "Recorded contribution #{id}: {} for year {} ({})",
        money(saved.amount),
        saved.year,
        saved.date
    );
    Ok(())
}

pub fn list(faithful: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let member = repo::get_faithful(&conn, faithful)?;
    let rows = repo::list_contributions(&conn, faithful)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Year", "Amount", "Notes"]);
    for c in &rows {
        table.add_row(vec![
            Cell::new(c.id.unwrap_or_default()),
            Cell::new(c.date),
            Cell::new(c.year),
            Cell::new(money(c.amount)),
            Cell::new(c.notes.as_deref().unwrap_or("")),
        ]);
    }
    let total: rust_decimal::Decimal = rows.iter().map(|c| c.amount).sum();
    println!("Contributions of {}\n{table}", member.name);
    println!("Total: {}", money(total));
    Ok(())
}

pub fn update(
    id: i64,
    amount: Option<&str>,
    date: Option<&str>,
    year: Option<i32>,
    notes: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let amount = amount.map(parse_amount).transpose()?;
    let date = date.map(parse_date).transpose()?;
    repo::update_contribution(
        &conn,
        id,
        &ContributionUpdate {
            amount,
            date,
            year,
            notes,
        },
    )?;
    println!("Updated contribution #{id}");
    Ok(())
}

pub fn delete(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    repo::delete_contribution(&conn, id)?;
    println!("Deleted contribution #{id}");
    Ok(())
}
