//! `slots` CLI -- extract free time and schedule reminders from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Busy intervals (JSON array of [start, end] pairs) → free-time set
//! slots free --start 2026-03-02T00:00:00Z --end 2026-03-09T00:00:00Z -i busy.json
//!
//! # Place 10 reminders across a free-time set and print what is left
//! slots schedule --count 10 -i free.json
//!
//! # Refresh one user's entry in a ledger file, then reserve slots from it
//! slots sync --ledger times.json --user u1 --start ... --end ... -i busy.json
//! slots reserve --ledger times.json --user u1 --count 10
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=debug` for detail.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use slot_engine::{FreeTimeLedger, FreeTimeSet, Interval, SchedulerConfig};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Free-time extraction and even reminder scheduling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Minutes each scheduled reminder reserves
    #[arg(long, global = true, default_value_t = 5)]
    block_minutes: u32,

    /// Free gaps shorter than this many minutes are discarded
    #[arg(long, global = true, default_value_t = 5)]
    min_keep_minutes: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free time in a window from busy intervals
    Free {
        /// Window start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Busy intervals JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Schedule reminders evenly across a free-time set and reserve their blocks
    Schedule {
        /// Number of reminders to place
        #[arg(short, long)]
        count: usize,
        /// Free-time set JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace a user's free time in a ledger file from fresh busy intervals
    Sync {
        /// Ledger JSON file (created if missing)
        #[arg(long)]
        ledger: PathBuf,
        /// User id to update
        #[arg(long)]
        user: String,
        /// Window start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Busy intervals JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Reserve reminder slots from a user's ledger entry
    Reserve {
        /// Ledger JSON file
        #[arg(long)]
        ledger: PathBuf,
        /// User id to reserve for
        #[arg(long)]
        user: String,
        /// Number of reminders to place
        #[arg(short, long)]
        count: usize,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("slots=warn,slot_engine=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SchedulerConfig::from_minutes(cli.block_minutes, cli.min_keep_minutes)
        .context("Invalid scheduling durations")?;
    debug!(?config, "resolved scheduler config");

    match cli.command {
        Commands::Free {
            start,
            end,
            input,
            output,
        } => {
            let busy = read_busy(input.as_deref())?;
            let free = slot_engine::free_time_frames(start, &busy, end, &config);
            info!(busy = busy.len(), free = free.len(), "extracted free time");
            write_json(output.as_deref(), &free)?;
        }
        Commands::Schedule {
            count,
            input,
            output,
        } => {
            let raw = read_input(input.as_deref())?;
            let free: FreeTimeSet =
                serde_json::from_str(&raw).context("Failed to parse free-time set")?;
            let reservation = slot_engine::schedule_and_reserve(&free, count, &config)
                .context("Failed to reserve reminder blocks")?;
            write_json(output.as_deref(), &reservation)?;
        }
        Commands::Sync {
            ledger,
            user,
            start,
            end,
            input,
        } => {
            let busy = read_busy(input.as_deref())?;
            let mut store = load_ledger(&ledger)?;
            let slots = store.sync(&user, start, &busy, end, &config).len();
            store
                .save(&ledger)
                .with_context(|| format!("Failed to write ledger: {}", ledger.display()))?;
            println!("Synced {} free slots for {}", slots, user);
        }
        Commands::Reserve {
            ledger,
            user,
            count,
            output,
        } => {
            let mut store = load_ledger(&ledger)?;
            let scheduled = store
                .reserve(&user, count, &config)
                .with_context(|| format!("Failed to reserve slots for {}", user))?;
            store
                .save(&ledger)
                .with_context(|| format!("Failed to write ledger: {}", ledger.display()))?;
            write_json(output.as_deref(), &scheduled)?;
        }
    }

    Ok(())
}

fn load_ledger(path: &Path) -> Result<FreeTimeLedger> {
    FreeTimeLedger::load(path)
        .with_context(|| format!("Failed to read ledger: {}", path.display()))
}

fn read_busy(path: Option<&Path>) -> Result<Vec<Interval>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse busy intervals")
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: serde::Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
