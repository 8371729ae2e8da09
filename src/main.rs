//! Pcrb CLI - Command-line interface for running and viewing robot battles.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Pcrb - Programmable combat robots on a grid
#[derive(Parser, Debug)]
#[command(name = "pcrb")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single battle between two built-in policies
    Run {
        /// Policy for the first robot (see `pcrb policies`)
        #[arg(long, default_value = "chaser")]
        first: String,

        /// Policy for the second robot
        #[arg(long, default_value = "chaser")]
        second: String,

        /// Maximum turns (default: 100)
        #[arg(short, long, default_value = "100")]
        turns: u32,

        /// Grid width (default: 9)
        #[arg(long, default_value = "9")]
        width: u16,

        /// Grid height (default: 7)
        #[arg(long, default_value = "7")]
        height: u16,

        /// Save the replay log to a JSON file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Write the turn-by-turn text log to a file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress progress messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many battles in parallel and aggregate statistics
    Tournament {
        /// Policy for the first robot
        #[arg(long, default_value = "chaser")]
        first: String,

        /// Policy for the second robot
        #[arg(long, default_value = "chaser")]
        second: String,

        /// Number of rounds to run (default: 100)
        #[arg(short, long, default_value = "100")]
        rounds: u32,

        /// Maximum turns per round (default: 100)
        #[arg(short, long, default_value = "100")]
        turns: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print a saved replay log
    Replay {
        /// Replay file (.json)
        #[arg(required = true)]
        file: PathBuf,

        /// Show only this turn
        #[arg(short, long)]
        turn: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReplayFormat,
    },

    /// List the built-in policies
    Policies,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            first,
            second,
            turns,
            width,
            height,
            save,
            log,
            format,
            quiet,
        } => cli::run::execute(&cli::run::RunOptions {
            first,
            second,
            turns,
            width,
            height,
            save,
            log,
            format,
            quiet,
        }),

        Commands::Tournament {
            first,
            second,
            rounds,
            turns,
            threads,
            format,
            progress,
        } => cli::tournament::execute(&first, &second, rounds, turns, threads, format, progress),

        Commands::Replay { file, turn, format } => cli::replay::execute(&file, turn, format),

        Commands::Policies => {
            cli::policies::execute();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
