use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::db::{get_connection, init_db, set_metadata, DB_FILE};
use crate::error::Result;
use crate::repo::{add_bec, add_contribution, add_faithful, add_subparish, NewContribution, NewFaithful};
use crate::settings::load_settings;

const PARISH_NAME: &str = "Musha Parish";

const SUBPARISHES: &[&str] = &["Musha", "Nyakariro", "Rugarama"];

struct DemoBec {
    subparish: &'static str,
    name: &'static str,
}

const BECS: &[DemoBec] = &[
    DemoBec { subparish: "Musha", name: "St. Paul" },
    DemoBec { subparish: "Musha", name: "St. Agnes" },
    DemoBec { subparish: "Nyakariro", name: "St. Kizito" },
    DemoBec { subparish: "Rugarama", name: "St. Cecilia" },
];

struct DemoMember {
    subparish: &'static str,
    bec: &'static str,
    name: &'static str,
    contact: Option<&'static str>,
    occupation: Option<&'static str>,
}

const MEMBERS: &[DemoMember] = &[
    DemoMember { subparish: "Musha", bec: "St. Paul", name: "Jean Bosco Habimana", contact: Some("0788000001"), occupation: Some("Farmer") },
    DemoMember { subparish: "Musha", bec: "St. Paul", name: "Marie Claire Uwase", contact: Some("0788000002"), occupation: Some("Teacher") },
    DemoMember { subparish: "Musha", bec: "St. Agnes", name: "Pascal Niyonzima", contact: None, occupation: Some("Mason") },
    DemoMember { subparish: "Musha", bec: "St. Agnes", name: "Immaculee Mukamana", contact: Some("0788000004"), occupation: None },
    DemoMember { subparish: "Nyakariro", bec: "St. Kizito", name: "Emmanuel Nsengimana", contact: Some("0788000005"), occupation: Some("Driver") },
    DemoMember { subparish: "Nyakariro", bec: "St. Kizito", name: "Josiane Ingabire", contact: None, occupation: Some("Trader") },
    DemoMember { subparish: "Rugarama", bec: "St. Cecilia", name: "Theoneste Bizimana", contact: Some("0788000007"), occupation: Some("Carpenter") },
    DemoMember { subparish: "Rugarama", bec: "St. Cecilia", name: "Chantal Mukandayisenga", contact: None, occupation: None },
];

const YEARS: &[i32] = &[2022, 2023, 2024, 2025];

/// Deterministic giving pattern: every member skips one year out of four,
/// so the matrix report always shows zero-padded cells.
fn insert_demo_data(conn: &Connection) -> Result<usize> {
    for name in SUBPARISHES {
        add_subparish(conn, name)?;
    }
    for bec in BECS {
        add_bec(conn, bec.subparish, bec.name)?;
    }

    let mut contribution_count = 0usize;
    for (i, member) in MEMBERS.iter().enumerate() {
        let bec = crate::repo::find_bec(conn, member.subparish, member.bec)?;
        let id = add_faithful(
            conn,
            &NewFaithful {
                name: member.name,
                contact_number: member.contact,
                address: Some(member.subparish),
                baptism_year: None,
                occupation: member.occupation,
                bec_id: bec.id,
            },
        )?;

        for (j, &year) in YEARS.iter().enumerate() {
            if (i + j) % YEARS.len() == 0 {
                continue;
            }
            let amount = Decimal::from(5_000 + (i as i64) * 750 + (j as i64) * 250);
            let date = NaiveDate::from_ymd_opt(year, 3 + (i as u32 % 6), 10).unwrap();
            add_contribution(
                conn,
                &NewContribution {
                    faithful_id: id,
                    amount,
                    date,
                    year: Some(year),
                    notes: None,
                },
            )?;
            contribution_count += 1;

            // Heavier givers contribute a second time in the year.
            if i % 3 == 0 {
                add_contribution(
                    conn,
                    &NewContribution {
                        faithful_id: id,
                        amount: Decimal::from(2_000),
                        date: NaiveDate::from_ymd_opt(year, 11, 20).unwrap(),
                        year: Some(year),
                        notes: Some("harvest offering"),
                    },
                )?;
                contribution_count += 1;
            }
        }
    }

    set_metadata(conn, "parish_name", PARISH_NAME)?;
    Ok(contribution_count)
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = PathBuf::from(&settings.data_dir).join(DB_FILE);

    if !db_path.exists() {
        eprintln!("No database found. Run `verger init` first.");
        std::process::exit(1);
    }

    let conn = get_connection(&db_path)?;
    init_db(&conn)?;

    // Idempotency guard
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM subparishes WHERE name = ?1)",
        [SUBPARISHES[0]],
        |r| r.get(0),
    )?;
    if exists {
        println!("Demo data already loaded (sub-parish '{}' exists).", SUBPARISHES[0]);
        return Ok(());
    }

    let contribution_count = insert_demo_data(&conn)?;

    println!("Demo data loaded!");
    println!("  Parish:         {PARISH_NAME}");
    println!("  Sub-parishes:   {}", SUBPARISHES.len());
    println!("  BECs:           {}", BECS.len());
    println!("  Faithful:       {}", MEMBERS.len());
    println!("  Contributions:  {contribution_count}");
    println!();
    println!("Try these next:");
    println!("  verger subparish list");
    println!("  verger report matrix");
    println!("  verger report summary");
    println!("  verger report matrix --subparish Musha --bec 'St. Paul'");
    Ok(())
}
