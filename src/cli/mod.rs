pub mod backup;
pub mod bec;
pub mod completions;
pub mod contribution;
pub mod demo;
#[cfg(feature = "pdf")]
pub mod export;
pub mod faithful;
pub mod init;
pub mod load;
pub mod parish;
pub mod report;
pub mod status;
pub mod subparish;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::error::{Result, VergerError};
use crate::reports::MatrixScope;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| VergerError::InvalidArgument(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse()
        .map_err(|_| VergerError::InvalidArgument(format!("invalid amount '{s}'")))
}

/// Resolve --subparish/--bec flags into a report scope. A BEC on its own
/// is ambiguous (BEC names are only unique within a sub-parish) and is
/// rejected up front.
pub(crate) fn matrix_scope<'a>(
    subparish: Option<&'a str>,
    bec: Option<&'a str>,
) -> Result<MatrixScope<'a>> {
    match (subparish, bec) {
        (Some(sp), Some(b)) => Ok(MatrixScope::Bec { subparish: sp, bec: b }),
        (Some(sp), None) => Ok(MatrixScope::SubParish(sp)),
        (None, Some(_)) => Err(VergerError::InvalidArgument(
            "--bec requires --subparish (BEC names are unique per sub-parish)".to_string(),
        )),
        (None, None) => Ok(MatrixScope::Parish),
    }
}

#[derive(Parser)]
#[command(name = "verger", about = "Membership and contribution tracking CLI for a parish.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up verger: choose a data directory and initialize the database.
    Init {
        /// Path for verger data (default: ~/Documents/verger)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch to an existing verger data directory.
    Load {
        /// Path to data directory containing verger.db
        path: String,
    },
    /// Show current database and summary statistics.
    Status,
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/verger-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Load sample data (sub-parishes, BECs, members, contributions).
    Demo,
    /// Generate a shell completion script.
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Parish-wide settings.
    Parish {
        #[command(subcommand)]
        command: ParishCommands,
    },
    /// Manage sub-parishes.
    Subparish {
        #[command(subcommand)]
        command: SubParishCommands,
    },
    /// Manage BECs (base ecclesial communities).
    Bec {
        #[command(subcommand)]
        command: BecCommands,
    },
    /// Manage faithful (parish members).
    Faithful {
        #[command(subcommand)]
        command: FaithfulCommands,
    },
    /// Manage contributions.
    Contribution {
        #[command(subcommand)]
        command: ContributionCommands,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export reports to PDF.
    #[cfg(feature = "pdf")]
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
}

#[derive(Subcommand)]
pub enum ParishCommands {
    /// Set the parish display name used on reports.
    SetName {
        /// Parish name, e.g. 'Musha Parish'
        name: String,
    },
}

#[derive(Subcommand)]
pub enum SubParishCommands {
    /// Add a new sub-parish.
    Add {
        /// Sub-parish name (must be unique)
        name: String,
    },
    /// List all sub-parishes.
    List,
    /// Rename a sub-parish.
    Rename {
        /// Current name
        name: String,
        /// New name
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
pub enum BecCommands {
    /// Add a BEC to a sub-parish.
    Add {
        /// BEC name (unique within the sub-parish)
        name: String,
        /// Sub-parish the BEC belongs to
        #[arg(long)]
        subparish: String,
    },
    /// List BECs, optionally for one sub-parish.
    List {
        #[arg(long)]
        subparish: Option<String>,
    },
    /// Rename a BEC.
    Rename {
        /// Current name
        name: String,
        #[arg(long)]
        subparish: String,
        /// New name
        #[arg(long)]
        to: String,
    },
    /// Delete a BEC together with its members and their contributions.
    Delete {
        name: String,
        #[arg(long)]
        subparish: String,
    },
}

#[derive(Subcommand)]
pub enum FaithfulCommands {
    /// Register a new faithful in a BEC.
    Add {
        /// Member name
        name: String,
        #[arg(long)]
        subparish: String,
        #[arg(long)]
        bec: String,
        /// Contact phone number
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long = "baptism-year")]
        baptism_year: Option<String>,
        #[arg(long)]
        occupation: Option<String>,
    },
    /// List faithful, optionally scoped to a sub-parish or BEC.
    List {
        #[arg(long)]
        subparish: Option<String>,
        #[arg(long)]
        bec: Option<String>,
    },
    /// Search faithful by name.
    Search {
        /// Substring to match (case-insensitive)
        query: String,
        /// Treat the query as a regular expression
        #[arg(long)]
        regex: bool,
    },
    /// Update a faithful's details.
    Update {
        /// Member ID (shown in `verger faithful list`)
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long = "baptism-year")]
        baptism_year: Option<String>,
        #[arg(long)]
        occupation: Option<String>,
        /// Move to a different BEC
        #[arg(long)]
        subparish: Option<String>,
        #[arg(long)]
        bec: Option<String>,
    },
    /// Delete a faithful and their contributions.
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ContributionCommands {
    /// Record a contribution for a member.
    Add {
        /// Member ID (shown in `verger faithful list`)
        #[arg(long)]
        faithful: i64,
        /// Amount, e.g. 1500 or 1500.50
        #[arg(long)]
        amount: String,
        /// Date of the contribution: YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Reporting year (default: the date's year)
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List a member's contributions, most recent first.
    List {
        #[arg(long)]
        faithful: i64,
    },
    /// Update a contribution.
    Update {
        /// Contribution ID (shown in `verger contribution list`)
        id: i64,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a contribution.
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Contribution matrix: one row per member, one column per year.
    Matrix {
        #[arg(long)]
        subparish: Option<String>,
        /// Restrict to one BEC (requires --subparish)
        #[arg(long)]
        bec: Option<String>,
        /// Group rows by member ID instead of name
        #[arg(long = "by-id")]
        by_id: bool,
        /// Also write the matrix as CSV to this path
        #[arg(long)]
        csv: Option<String>,
    },
    /// Contribution totals by sub-parish, or by BEC within one sub-parish.
    Summary {
        /// Break down one sub-parish by BEC
        #[arg(long)]
        subparish: Option<String>,
        /// Restrict to one reporting year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Parish-wide contribution total.
    Total {
        #[arg(long)]
        year: Option<i32>,
    },
    /// List the years that have contributions.
    Years,
}

#[cfg(feature = "pdf")]
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export the contribution matrix to PDF.
    Matrix {
        #[arg(long)]
        subparish: Option<String>,
        #[arg(long)]
        bec: Option<String>,
        #[arg(long = "by-id")]
        by_id: bool,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
    /// Export contribution totals to PDF.
    Summary {
        #[arg(long)]
        subparish: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Export the member roster to PDF.
    Roster {
        #[arg(long)]
        subparish: Option<String>,
        #[arg(long)]
        bec: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Export all reports to PDF.
    All {
        /// Output directory
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_scope_resolution() {
        assert!(matches!(matrix_scope(None, None).unwrap(), MatrixScope::Parish));
        assert!(matches!(
            matrix_scope(Some("Musha"), None).unwrap(),
            MatrixScope::SubParish("Musha")
        ));
        assert!(matches!(
            matrix_scope(Some("Musha"), Some("St. Paul")).unwrap(),
            MatrixScope::Bec { .. }
        ));
        assert!(matrix_scope(None, Some("St. Paul")).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500.50").unwrap(), "1500.50".parse::<Decimal>().unwrap());
        assert!(parse_amount("abc").is_err());
    }
}
