mod cli;
mod db;
mod error;
mod fmt;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod repo;
mod reports;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "pdf")]
use cli::ExportCommands;
use cli::{
    BecCommands, Cli, Commands, ContributionCommands, FaithfulCommands, ParishCommands,
    ReportCommands, SubParishCommands,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Load { path } => cli::load::run(&path),
        Commands::Status => cli::status::run(),
        Commands::Backup { output } => cli::backup::run(output),
        Commands::Demo => cli::demo::run(),
        Commands::Completions { shell } => cli::completions::run(shell),
        Commands::Parish { command } => match command {
            ParishCommands::SetName { name } => cli::parish::set_name(&name),
        },
        Commands::Subparish { command } => match command {
            SubParishCommands::Add { name } => cli::subparish::add(&name),
            SubParishCommands::List => cli::subparish::list(),
            SubParishCommands::Rename { name, to } => cli::subparish::rename(&name, &to),
        },
        Commands::Bec { command } => match command {
            BecCommands::Add { name, subparish } => cli::bec::add(&name, &subparish),
            BecCommands::List { subparish } => cli::bec::list(subparish.as_deref()),
            BecCommands::Rename { name, subparish, to } => {
                cli::bec::rename(&name, &subparish, &to)
            }
            BecCommands::Delete { name, subparish } => cli::bec::delete(&name, &subparish),
        },
        Commands::Faithful { command } => match command {
            FaithfulCommands::Add {
                name,
                subparish,
                bec,
                contact,
                address,
                baptism_year,
                occupation,
            } => cli::faithful::add(
                &name,
                &subparish,
                &bec,
                contact.as_deref(),
                address.as_deref(),
                baptism_year.as_deref(),
                occupation.as_deref(),
            ),
            FaithfulCommands::List { subparish, bec } => {
                cli::faithful::list(subparish.as_deref(), bec.as_deref())
            }
            FaithfulCommands::Search { query, regex } => cli::faithful::search(&query, regex),
            FaithfulCommands::Update {
                id,
                name,
                contact,
                address,
                baptism_year,
                occupation,
                subparish,
                bec,
            } => cli::faithful::update(
                id,
                name.as_deref(),
                contact.as_deref(),
                address.as_deref(),
                baptism_year.as_deref(),
                occupation.as_deref(),
                subparish.as_deref(),
                bec.as_deref(),
            ),
            FaithfulCommands::Delete { id } => cli::faithful::delete(id),
        },
        Commands::Contribution { command } => match command {
            ContributionCommands::Add {
                faithful,
                amount,
                date,
                year,
                notes,
            } => cli::contribution::add(faithful, &amount, &date, year, notes.as_deref()),
            ContributionCommands::List { faithful } => cli::contribution::list(faithful),
            ContributionCommands::Update {
                id,
                amount,
                date,
                year,
                notes,
            } => cli::contribution::update(
                id,
                amount.as_deref(),
                date.as_deref(),
                year,
                notes.as_deref(),
            ),
            ContributionCommands::Delete { id } => cli::contribution::delete(id),
        },
        Commands::Report { command } => match command {
            ReportCommands::Matrix {
                subparish,
                bec,
                by_id,
                csv,
            } => cli::report::matrix(subparish.as_deref(), bec.as_deref(), by_id, csv.as_deref()),
            ReportCommands::Summary { subparish, year } => {
                cli::report::summary(subparish.as_deref(), year)
            }
            ReportCommands::Total { year } => cli::report::total(year),
            ReportCommands::Years => cli::report::years(),
        },
        #[cfg(feature = "pdf")]
        Commands::Export { command } => match command {
            ExportCommands::Matrix {
                subparish,
                bec,
                by_id,
                output,
            } => cli::export::matrix(subparish.as_deref(), bec.as_deref(), by_id, output)
                .map(|_| ()),
            ExportCommands::Summary {
                subparish,
                year,
                output,
            } => cli::export::summary(subparish.as_deref(), year, output).map(|_| ()),
            ExportCommands::Roster {
                subparish,
                bec,
                output,
            } => cli::export::roster(subparish.as_deref(), bec.as_deref(), output).map(|_| ()),
            ExportCommands::All { output_dir } => cli::export::all(output_dir).map(|_| ()),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
