//! `bbuddy` command-line journal.
//!
//! # Responsibility
//! - Parse commands and resolve configuration.
//! - Open the journal database, falling back to memory when it cannot be
//!   opened so a session never aborts on storage trouble.

mod commands;
mod config;

use anyhow::{Context, Result};
use buddy_core::db::open_db;
use buddy_core::{IsoDate, JournalService, MemoryKvRepository, SqliteKvRepository, TaskSlot};
use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use log::warn;
use std::io;
use std::path::PathBuf;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "bbuddy")]
#[command(about = "Daily mood, tasks and notes journal", version)]
struct Cli {
    /// Directory holding the journal database and logs
    #[arg(long, global = true, env = "BBUDDY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "BBUDDY_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show the check-in for one day
    Show {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<IsoDate>,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change fields of one day's check-in
    Set {
        #[arg(long)]
        date: Option<IsoDate>,

        /// Mood from 1 to 10
        #[arg(long)]
        mood: Option<i64>,

        /// Text of the nice-to-do
        #[arg(long)]
        nice: Option<String>,

        #[arg(long)]
        evening_win: Option<String>,

        #[arg(long, value_parser = BoolishValueParser::new())]
        kid_time: Option<bool>,

        #[arg(long, value_parser = BoolishValueParser::new())]
        boundary_kept: Option<bool>,

        #[arg(long)]
        boundary_note: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit or tick one task: must-do 1, 2, 3 or `nice`
    Task {
        #[arg(value_parser = commands::parse_slot)]
        slot: TaskSlot,

        #[arg(long)]
        date: Option<IsoDate>,

        /// New task text
        #[arg(long)]
        text: Option<String>,

        /// Flip the done mark
        #[arg(long)]
        toggle: bool,
    },
    /// Week at a glance around a day
    Week {
        #[arg(long)]
        date: Option<IsoDate>,
    },
    /// Export every saved day
    Export {
        format: ExportKind,

        /// Directory to write the export file into
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Merge a JSON export into the journal
    Import { file: PathBuf },
    /// Erase ALL saved entries
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print versions and where logs go
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportKind {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.data_dir, cli.log_level)?;

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "Failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;

    // Logging trouble must not block journaling.
    if let Err(err) = buddy_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("warning: logging disabled: {err}");
    }

    let stdout = io::stdout();
    let stdin = io::stdin();
    let mut out = stdout.lock();
    let mut input = stdin.lock();

    match open_db(config.db_path()) {
        Ok(conn) => {
            let service = JournalService::new(SqliteKvRepository::new(&conn));
            commands::run(&service, cli.command, &mut out, &mut input)
        }
        Err(err) => {
            warn!("event=cli_storage module=cli status=fallback mode=memory error={err}");
            eprintln!("warning: journal storage unavailable ({err}); changes will not be saved");
            let service = JournalService::new(MemoryKvRepository::new());
            commands::run(&service, cli.command, &mut out, &mut input)
        }
    }
}
