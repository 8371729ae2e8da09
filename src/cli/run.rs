//! Run command implementation.

use super::output::{format_text, JsonBattleResult};
use super::{lookup_policy, CliError, OutputFormat};
use pcrb::{
    Battle, BattleConfig, BattleReport, Contender, LogSink, NullSink, Position, WriterSink,
    DEFAULT_FIRST_START, DEFAULT_SECOND_START,
};
use std::path::PathBuf;

/// Flags of the run command.
#[derive(Debug)]
pub(crate) struct RunOptions {
    /// First robot's policy name.
    pub(crate) first: String,
    /// Second robot's policy name.
    pub(crate) second: String,
    /// Turn limit.
    pub(crate) turns: u32,
    /// Grid width.
    pub(crate) width: u16,
    /// Grid height.
    pub(crate) height: u16,
    /// Where to save the replay log.
    pub(crate) save: Option<PathBuf>,
    /// Where to write the text log.
    pub(crate) log: Option<PathBuf>,
    /// Result format.
    pub(crate) format: OutputFormat,
    /// Suppress progress messages.
    pub(crate) quiet: bool,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if a policy is unknown, the setup is invalid, a policy
/// breaks its contract, or an output file cannot be written.
pub(crate) fn execute(options: &RunOptions) -> Result<(), CliError> {
    let first = lookup_policy(&options.first)?;
    let second = lookup_policy(&options.second)?;

    let config = BattleConfig {
        max_turn: options.turns,
        x_max: options.width,
        y_max: options.height,
    };

    // Clamp default starts into small grids
    let second_start = Position::new(
        DEFAULT_SECOND_START.x.min(options.width.saturating_sub(1)),
        DEFAULT_SECOND_START.y.min(options.height.saturating_sub(1)),
    );
    let first_start = Position::new(
        DEFAULT_FIRST_START.x.min(options.width.saturating_sub(1)),
        DEFAULT_FIRST_START.y.min(options.height.saturating_sub(1)),
    );

    if !options.quiet {
        eprintln!(
            "Running battle: {} vs {} on {}x{} for up to {} turns",
            options.first, options.second, options.width, options.height, options.turns
        );
    }

    let first = Contender::new("Robot A", first_start, first.as_ref());
    let second = Contender::new("Robot B", second_start, second.as_ref());

    let report = match &options.log {
        Some(path) => {
            let report = play(config, first, second, WriterSink::create(path)?)?;
            if !options.quiet {
                eprintln!("Battle log written to: {}", path.display());
            }
            report
        }
        None => play(config, first, second, NullSink)?,
    };

    if let Some(save_path) = &options.save {
        report.replay.save(save_path)?;
        if !options.quiet {
            eprintln!("Replay saved to: {}", save_path.display());
        }
    }

    match options.format {
        OutputFormat::Text => {
            print!("{}", format_text(&report));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBattleResult::from_report(&report))
                .map_err(|e| CliError::Other(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn play<S: LogSink>(
    config: BattleConfig,
    first: Contender<'_>,
    second: Contender<'_>,
    sink: S,
) -> Result<BattleReport, CliError> {
    Ok(Battle::new(config, first, second, sink)?.run()?)
}
