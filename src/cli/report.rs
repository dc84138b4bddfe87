use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::cli::matrix_scope;
use crate::db::{get_connection, DB_FILE};
use crate::error::Result;
use crate::fmt::money;
use crate::reports::{self, MatrixKey, MatrixReport};
use crate::settings::get_data_dir;

pub(crate) fn scope_label(subparish: Option<&str>, bec: Option<&str>) -> String {
    match (subparish, bec) {
        (Some(sp), Some(b)) => format!("BEC {b}, sub-parish {sp}"),
        (Some(sp), None) => format!("Sub-parish {sp}"),
        _ => "Whole parish".to_string(),
    }
}

fn year_label(year: Option<i32>) -> String {
    match year {
        Some(y) => format!("Year {y}"),
        None => "All years".to_string(),
    }
}

fn matrix_table(report: &MatrixReport) -> Table {
    let mut table = Table::new();
    let mut header: Vec<Cell> = vec![Cell::new("Name")];
    for year in &report.years {
        header.push(Cell::new(year));
    }
    header.push(Cell::new("Total"));
    table.set_header(header);

    for row in &report.rows {
        let mut cells: Vec<Cell> = vec![Cell::new(&row.name)];
        for year in &report.years {
            cells.push(Cell::new(money(row.yearly[year])));
        }
        cells.push(Cell::new(money(row.total)));
        table.add_row(cells);
    }

    let grand: Decimal = report.rows.iter().map(|r| r.total).sum();
    let mut footer: Vec<Cell> = vec![Cell::new("TOTAL".bold())];
    for _ in &report.years {
        footer.push(Cell::new(""));
    }
    footer.push(Cell::new(money(grand).bold()));
    table.add_row(footer);
    table
}

fn write_matrix_csv(report: &MatrixReport, path: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec!["Name".to_string()];
    header.extend(report.years.iter().map(|y| y.to_string()));
    header.push("Total".to_string());
    wtr.write_record(&header)?;
    for row in &report.rows {
        let mut record = vec![row.name.clone()];
        record.extend(report.years.iter().map(|y| format!("{:.2}", row.yearly[y])));
        record.push(format!("{:.2}", row.total));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn matrix(
    subparish: Option<&str>,
    bec: Option<&str>,
    by_id: bool,
    csv: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let scope = matrix_scope(subparish, bec)?;
    let key = if by_id { MatrixKey::FaithfulId } else { MatrixKey::Name };
    let report = reports::contribution_matrix(&conn, &scope, key)?;

    if report.rows.is_empty() {
        println!("No contributions recorded for {}.", scope_label(subparish, bec));
        return Ok(());
    }

    let table = matrix_table(&report);
    println!("Contribution Matrix — {}\n{table}", scope_label(subparish, bec));

    if let Some(path) = csv {
        write_matrix_csv(&report, path)?;
        println!("Wrote {path}");
    }
    Ok(())
}

pub fn summary(subparish: Option<&str>, year: Option<i32>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;

    let (group_label, totals) = match subparish {
        Some(sp) => ("BEC", reports::totals_by_bec(&conn, sp, year)?),
        None => ("Sub-parish", reports::totals_by_subparish(&conn, year)?),
    };

    let mut table = Table::new();
    table.set_header(vec![group_label, "Amount"]);
    for item in &totals {
        table.add_row(vec![Cell::new(&item.name), Cell::new(money(item.total))]);
    }
    let grand: Decimal = totals.iter().map(|t| t.total).sum();
    table.add_row(vec![
        Cell::new("TOTAL".green().bold()),
        Cell::new(money(grand).bold()),
    ]);

    let scope = match subparish {
        Some(sp) => format!("Sub-parish {sp}"),
        None => "By sub-parish".to_string(),
    };
    println!("Contribution Summary — {scope}, {}\n{table}", year_label(year));
    Ok(())
}

pub fn total(year: Option<i32>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let total = reports::grand_total(&conn, year)?;
    println!("{}: {}", year_label(year), money(total));
    Ok(())
}

pub fn years() -> Result<()> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let years = reports::distinct_years(&conn)?;
    if years.is_empty() {
        println!("No contributions recorded yet.");
        return Ok(());
    }
    println!("Years with contributions:");
    for year in years {
        println!("  {year}");
    }
    Ok(())
}
