//! Library Fines CLI
//!
//! Reads a library database document and writes a fine report as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- db.json > fines.csv
//! cargo run -- db.json totals --as-of 2024-01-12
//! cargo run -- db.json stats
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `LIBRARY_FINES_DAILY_RATE`, `LIBRARY_FINES_DAMAGE_RATE`: override the rates

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use library_fines::date::parse_calendar_date;
use library_fines::{
    FineConfig, FineEngine, LibraryError, LibrarySnapshot, LibraryStats, Result, DAILY_RATE,
    DAMAGE_RATE,
};
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "library-fines")]
#[command(about = "Compute library fines from a loans/members/books snapshot")]
struct Args {
    /// Path to the JSON database document
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,

    /// Date to evaluate outstanding loans against (YYYY-MM-DD, default today)
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Late fee per overdue day
    #[arg(long, global = true, env = "LIBRARY_FINES_DAILY_RATE", default_value_t = DAILY_RATE)]
    daily_rate: u64,

    /// Flat fee for a damaged book
    #[arg(long, global = true, env = "LIBRARY_FINES_DAMAGE_RATE", default_value_t = DAMAGE_RATE)]
    damage_rate: u64,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// One row per loan (default)
    Fines,
    /// One row per member with the total fine
    Totals,
    /// Dashboard counters
    Stats,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let now = resolve_as_of(args.as_of.as_deref())?;

    let file = File::open(&args.db)?;
    let snapshot = LibrarySnapshot::from_db_json(BufReader::new(file))?;
    info!(
        "Loaded {} loans, {} members, {} books from {}",
        snapshot.loans.len(),
        snapshot.members.len(),
        snapshot.books.len(),
        args.db.display()
    );

    let engine = FineEngine::new(FineConfig::new(args.daily_rate, args.damage_rate));
    let rates = engine.config();
    info!(
        "Fines as of {}: {} per overdue day, {} per damaged book",
        now, rates.daily_rate, rates.damage_rate
    );

    let stdout = io::stdout();
    let handle = stdout.lock();

    match args.command.unwrap_or(Command::Fines) {
        Command::Fines => engine.build_report(&snapshot, now).write_loan_lines(handle)?,
        Command::Totals => engine
            .build_report(&snapshot, now)
            .write_member_totals(handle)?,
        Command::Stats => LibraryStats::from_snapshot(&snapshot, now).write_csv(handle)?,
    }

    Ok(())
}

/// The wall clock is read here only; the engine always gets an explicit date.
fn resolve_as_of(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(raw) => parse_calendar_date(raw).ok_or_else(|| LibraryError::InvalidArgument {
            message: format!("--as-of {:?} is not a calendar date", raw),
        }),
    }
}
