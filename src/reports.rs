use std::collections::{BTreeMap, BTreeSet, HashMap};

use rusqlite::Connection;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::Result;
use crate::models::decimal_from_cents;
use crate::repo::{find_bec, find_subparish};

// ---------------------------------------------------------------------------
// Yearly totals (query layer)
// ---------------------------------------------------------------------------

/// One pre-aggregated (member, year) total as returned by the query layer.
#[derive(Debug, Clone)]
pub struct YearlyTotal {
    pub faithful_id: i64,
    pub name: String,
    pub year: i32,
    pub total: Decimal,
}

/// Which slice of the parish a matrix report covers.
pub enum MatrixScope<'a> {
    Parish,
    SubParish(&'a str),
    Bec { subparish: &'a str, bec: &'a str },
}

/// Fetch per-(member, year) contribution sums for the given scope,
/// ordered by member name then year.
pub fn yearly_totals(conn: &Connection, scope: &MatrixScope) -> Result<Vec<YearlyTotal>> {
    let (clause, params): (&str, Vec<i64>) = match scope {
        MatrixScope::Parish => ("", Vec::new()),
        MatrixScope::SubParish(name) => {
            let sp = find_subparish(conn, name)?;
            ("WHERE b.subparish_id = ?1 ", vec![sp.id])
        }
        MatrixScope::Bec { subparish, bec } => {
            let b = find_bec(conn, subparish, bec)?;
            ("WHERE f.bec_id = ?1 ", vec![b.id])
        }
    };
    let sql = format!(
        "SELECT f.id, f.name, c.year, SUM(c.amount_cents) \
         FROM contributions c \
         JOIN faithful f ON c.faithful_id = f.id \
         JOIN becs b ON f.bec_id = b.id \
         {clause}GROUP BY f.id, f.name, c.year \
         ORDER BY f.name ASC, c.year ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), |row| {
        let cents: i64 = row.get(3)?;
        Ok(YearlyTotal {
            faithful_id: row.get(0)?,
            name: row.get(1)?,
            year: row.get(2)?,
            total: decimal_from_cents(cents),
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Pivot builder
// ---------------------------------------------------------------------------

/// Row identity for the pivot. The ledgers group by member name, which
/// merges distinct members who happen to share a name; grouping by id is
/// offered for callers who want one row per member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKey {
    Name,
    FaithfulId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRow {
    pub name: String,
    pub yearly: BTreeMap<i32, Decimal>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixReport {
    /// Distinct years across the whole result set, ascending. Every row's
    /// yearly map covers exactly these years.
    pub years: Vec<i32>,
    pub rows: Vec<ContributionRow>,
}

#[derive(Hash, PartialEq, Eq)]
enum RowId {
    Name(String),
    Id(i64),
}

/// Reshape flat (member, year, total) tuples into one row per member with
/// a complete year map and a grand total. Rows keep the first-seen order
/// of the input; years missing for a member are padded with a 4-decimal
/// zero so every row spans the same columns.
pub fn build_matrix(tuples: &[YearlyTotal], key: MatrixKey) -> MatrixReport {
    let years: BTreeSet<i32> = tuples.iter().map(|t| t.year).collect();

    let mut index: HashMap<RowId, usize> = HashMap::new();
    let mut rows: Vec<ContributionRow> = Vec::new();
    for tuple in tuples {
        let row_id = match key {
            MatrixKey::Name => RowId::Name(tuple.name.clone()),
            MatrixKey::FaithfulId => RowId::Id(tuple.faithful_id),
        };
        let idx = *index.entry(row_id).or_insert_with(|| {
            rows.push(ContributionRow {
                name: tuple.name.clone(),
                yearly: BTreeMap::new(),
                total: Decimal::ZERO,
            });
            rows.len() - 1
        });
        // Accumulate rather than overwrite: with name grouping, two members
        // sharing a name fold into one cell.
        *rows[idx].yearly.entry(tuple.year).or_insert(Decimal::ZERO) += tuple.total;
    }

    for row in &mut rows {
        let mut total = Decimal::ZERO;
        for &year in &years {
            let amount = *row
                .yearly
                .entry(year)
                .or_insert_with(|| Decimal::new(0, 4));
            total += amount;
        }
        row.total = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }

    debug!(rows = rows.len(), years = years.len(), "built contribution matrix");
    MatrixReport {
        years: years.into_iter().collect(),
        rows,
    }
}

/// Convenience wrapper: query the scope and pivot in one step.
pub fn contribution_matrix(
    conn: &Connection,
    scope: &MatrixScope,
    key: MatrixKey,
) -> Result<MatrixReport> {
    let tuples = yearly_totals(conn, scope)?;
    Ok(build_matrix(&tuples, key))
}

// ---------------------------------------------------------------------------
// Grouped sums
// ---------------------------------------------------------------------------

/// One grouping entity (sub-parish or BEC) with its summed contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub name: String,
    pub total: Decimal,
}

/// Contribution totals grouped by sub-parish, ordered by name. Entities
/// with no contributions in range are simply absent.
pub fn totals_by_subparish(conn: &Connection, year: Option<i32>) -> Result<Vec<GroupTotal>> {
    let (clause, params): (&str, Vec<i64>) = match year {
        Some(y) => ("WHERE c.year = ?1 ", vec![y as i64]),
        None => ("", Vec::new()),
    };
    let sql = format!(
        "SELECT s.name, SUM(c.amount_cents) \
         FROM contributions c \
         JOIN faithful f ON c.faithful_id = f.id \
         JOIN becs b ON f.bec_id = b.id \
         JOIN subparishes s ON b.subparish_id = s.id \
         {clause}GROUP BY s.id, s.name \
         ORDER BY s.name"
    );
    query_group_totals(conn, &sql, &params)
}

/// Contribution totals grouped by BEC within one sub-parish, ordered by
/// name. The sub-parish must exist; an unknown name is rejected before
/// any aggregation runs.
pub fn totals_by_bec(
    conn: &Connection,
    subparish_name: &str,
    year: Option<i32>,
) -> Result<Vec<GroupTotal>> {
    let sp = find_subparish(conn, subparish_name)?;
    let (clause, params): (&str, Vec<i64>) = match year {
        Some(y) => ("AND c.year = ?2 ", vec![sp.id, y as i64]),
        None => ("", vec![sp.id]),
    };
    let sql = format!(
        "SELECT b.name, SUM(c.amount_cents) \
         FROM contributions c \
         JOIN faithful f ON c.faithful_id = f.id \
         JOIN becs b ON f.bec_id = b.id \
         WHERE b.subparish_id = ?1 {clause}\
         GROUP BY b.id, b.name \
         ORDER BY b.name"
    );
    query_group_totals(conn, &sql, &params)
}

fn query_group_totals(conn: &Connection, sql: &str, params: &[i64]) -> Result<Vec<GroupTotal>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), |row| {
        let cents: i64 = row.get(1)?;
        Ok(GroupTotal {
            name: row.get(0)?,
            total: decimal_from_cents(cents),
        })
    })?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

// ---------------------------------------------------------------------------
// Totals and years
// ---------------------------------------------------------------------------

/// Every year with at least one contribution, most recent first.
pub fn distinct_years(conn: &Connection) -> Result<Vec<i32>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT year FROM contributions ORDER BY year DESC")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Parish-wide contribution total, optionally restricted to one year.
pub fn grand_total(conn: &Connection, year: Option<i32>) -> Result<Decimal> {
    let cents: i64 = match year {
        Some(y) => conn.query_row(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM contributions WHERE year = ?1",
            [y],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM contributions",
            [],
            |row| row.get(0),
        )?,
    };
    Ok(decimal_from_cents(cents))
}
