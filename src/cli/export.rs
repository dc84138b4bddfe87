use std::path::PathBuf;

use rusqlite::Connection;
use tracing::info;

use crate::cli::matrix_scope;
use crate::cli::report::scope_label;
use crate::db::{get_connection, get_metadata, DB_FILE};
use crate::error::{Result, VergerError};
use crate::pdf;
use crate::repo;
use crate::reports::{self, MatrixKey};
use crate::settings::get_data_dir;

fn default_path(name: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("{name}-{date}.pdf"))
}

fn parish_name(conn: &Connection) -> String {
    get_metadata(conn, "parish_name").unwrap_or_default()
}

fn write_pdf(bytes: &[u8], path: &PathBuf) -> Result<String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    let path_str = format!("{}", path.display());
    info!(path = %path_str, bytes = bytes.len(), "wrote PDF report");
    println!("Wrote {path_str}");
    Ok(path_str)
}

pub fn matrix(
    subparish: Option<&str>,
    bec: Option<&str>,
    by_id: bool,
    output: Option<String>,
) -> Result<String> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let scope = matrix_scope(subparish, bec)?;
    let key = if by_id { MatrixKey::FaithfulId } else { MatrixKey::Name };
    let report = reports::contribution_matrix(&conn, &scope, key)?;
    if report.rows.is_empty() {
        return Err(VergerError::Other(format!(
            "no contributions recorded for {}",
            scope_label(subparish, bec)
        )));
    }
    let bytes = pdf::render_matrix(&report, &parish_name(&conn), &scope_label(subparish, bec))?;
    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path("matrix"));
    write_pdf(&bytes, &path)
}

pub fn summary(
    subparish: Option<&str>,
    year: Option<i32>,
    output: Option<String>,
) -> Result<String> {
    let conn = get_connection(&get_data_dir().join(DB_FILE))?;
    let (group_label, totals, scope) = match subparish {
        Some(sp) => (
            "BEC",
            reports::totals_by_bec(&conn, sp, year)?,
            format!("Sub-parish {sp}"),
        ),
        None => (
            "Sub-parish",
            reports::totals_by_subparish(&conn, year)?,
            "By sub-parish".to_string(),
        ),
    };
    let label = match year {
        Some(y) => format!("{scope}, year {y}"),
        None => format!("{scope}, all years"),
    };
    let bytes = pdf::render_summary(&totals, group_label, &parish_name(&conn), &label)?;
    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path("summary"));
    write_pdf(&bytes, &path)
}

pub fn roster(
    subparish: Option<&str>,
    bec: Option<&str>,
    output: Option<String>,
) -> Result<String> {
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
    let bytes = pdf::render_roster(&rows, &parish_name(&conn), &scope_label(subparish, bec))?;
    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path("roster"));
    write_pdf(&bytes, &path)
}

pub fn all(output_dir: Option<String>) -> Result<String> {
    let data_dir = get_data_dir();
    let conn = get_connection(&data_dir.join(DB_FILE))?;
    let parish = parish_name(&conn);
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();

    let dir = output_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("exports"));
    std::fs::create_dir_all(&dir)?;

    let path = |name: &str| dir.join(format!("{name}-{date}.pdf"));

    let report =
        reports::contribution_matrix(&conn, &reports::MatrixScope::Parish, MatrixKey::Name)?;
    write_pdf(
        &pdf::render_matrix(&report, &parish, "Whole parish")?,
        &path("matrix"),
    )?;

    let totals = reports::totals_by_subparish(&conn, None)?;
    write_pdf(
        &pdf::render_summary(&totals, "Sub-parish", &parish, "By sub-parish, all years")?,
        &path("summary"),
    )?;

    let rows = repo::list_faithful(&conn)?;
    write_pdf(
        &pdf::render_roster(&rows, &parish, "Whole parish")?,
        &path("roster"),
    )?;

    Ok(format!("All reports exported to {}", dir.display()))
}
