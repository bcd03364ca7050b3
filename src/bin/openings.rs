//! Browse the opening catalog from the command line.
//!
//! Usage:
//!   openings list --volume C
//!   openings eco B20
//!   openings --format json name "Ruy Lopez"
//!   openings line e4 e5 Nf3 Nc6 Bb5 a6
//!   openings validate catalogs/openings_v1.json

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use openings::catalog::BUNDLED_CATALOG_JSON;
use openings::{CatalogSource, EcoVolume, OpeningCatalog, OpeningRecord};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "openings")]
#[command(about = "Browse the named chess opening catalog")]
struct Cli {
    /// Catalog file to use instead of the bundled one (overrides OPENINGS_CATALOG).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List openings in catalog order.
    List {
        /// Only show one ECO volume (A-E).
        #[arg(long, value_parser = parse_volume)]
        volume: Option<EcoVolume>,
    },
    /// Look up an opening by exact ECO code.
    Eco { code: String },
    /// Look up an opening by exact name.
    Name { name: String },
    /// Case-insensitive search over opening names.
    Search { term: String },
    /// Show the openings consistent with a played line.
    Line {
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Validate a catalog document and print a summary.
    Validate {
        /// Catalog file; defaults to the active catalog.
        file: Option<PathBuf>,
    },
}

fn parse_volume(raw: &str) -> Result<EcoVolume, String> {
    EcoVolume::try_from(raw).map_err(|err| err.to_string())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let source = CatalogSource::from_env(cli.catalog);
    let open = || {
        source
            .open()
            .with_context(|| format!("opening {}", source.describe()))
    };

    match cli.command {
        Command::List { volume } => {
            let catalog = open()?;
            let records: Vec<&OpeningRecord> = match volume {
                Some(volume) => catalog.in_volume(volume).collect(),
                None => catalog.list_all().iter().collect(),
            };
            print_list(&records, format)
        }
        Command::Eco { code } => {
            let catalog = open()?;
            let Some(record) = catalog.find_by_eco(&code) else {
                bail!("no opening with ECO code {code}");
            };
            print_record(record, format)
        }
        Command::Name { name } => {
            let catalog = open()?;
            let Some(record) = catalog.find_by_name(&name) else {
                bail!("no opening named '{name}'");
            };
            print_record(record, format)
        }
        Command::Search { term } => {
            let catalog = open()?;
            print_list(&catalog.search(&term), format)
        }
        Command::Line { moves } => {
            let catalog = open()?;
            print_line(&catalog, &moves, format)
        }
        Command::Validate { file } => {
            let target = file.map(CatalogSource::File).unwrap_or(source);
            run_validate(&target, format)
        }
    }
}

fn print_list(records: &[&OpeningRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&records),
        Format::Text => {
            let width = records
                .iter()
                .map(|record| record.name.chars().count())
                .max()
                .unwrap_or(0);
            for record in records {
                println!(
                    "{}  {:<width$}  {}",
                    record.eco,
                    record.name,
                    record.move_text(),
                    width = width
                );
            }
            Ok(())
        }
    }
}

fn print_record(record: &OpeningRecord, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(record),
        Format::Text => {
            println!("{} [{}]", record.name, record.eco);
            println!("moves:       {}", record.move_text());
            if let Some(volume) = record.eco.volume() {
                println!("volume:      {} ({})", volume, volume.title());
            }
            println!(
                "to move:     {} after {} plies",
                record.side_to_move().as_str(),
                record.ply_count()
            );
            println!("description: {}", record.description);
            Ok(())
        }
    }
}

fn print_line(catalog: &OpeningCatalog, moves: &[String], format: Format) -> Result<()> {
    let continuations: Vec<&OpeningRecord> = catalog.matching_line(moves).collect();
    let reached = catalog.deepest_match(moves);
    match format {
        Format::Json => print_json(&json!({
            "line": moves,
            "reached": reached,
            "continuations": continuations,
        })),
        Format::Text => {
            match reached {
                Some(record) => println!("reached: {} [{}]", record.name, record.eco),
                None => println!("reached: none"),
            }
            if !continuations.is_empty() {
                println!("continuations:");
                print_list(&continuations, Format::Text)?;
            }
            Ok(())
        }
    }
}

fn run_validate(source: &CatalogSource, format: Format) -> Result<()> {
    let catalog = match source {
        CatalogSource::Bundled => {
            let value: Value =
                serde_json::from_str(BUNDLED_CATALOG_JSON).context("parsing bundled catalog")?;
            OpeningCatalog::from_checked_value(value).context("validating bundled catalog")?
        }
        CatalogSource::File(path) => OpeningCatalog::load(path)?,
    };
    match format {
        Format::Json => print_json(&json!({
            "ok": true,
            "source": source.describe(),
            "key": catalog.key(),
            "schema_version": catalog.schema_version(),
            "openings": catalog.len(),
        })),
        Format::Text => {
            println!(
                "ok: {} ({} openings, {}) from {}",
                catalog.key(),
                catalog.len(),
                catalog.schema_version(),
                source.describe()
            );
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
