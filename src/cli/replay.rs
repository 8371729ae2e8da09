//! Replay command implementation.

use super::{CliError, ReplayFormat};
use pcrb::replay::{render_summary, ReplayLog, ReplayViewer};
use std::path::Path;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid replay log,
/// or the requested turn was not played.
pub(crate) fn execute(path: &Path, turn: Option<u32>, format: ReplayFormat) -> Result<(), CliError> {
    let log = ReplayLog::load(path).map_err(|e| {
        CliError::Other(format!("Failed to load replay {}: {e}", path.display()))
    })?;
    log.validate()?;

    match format {
        ReplayFormat::Json => match turn {
            Some(turn) => {
                let viewer = ReplayViewer::new_at_turn(log, turn)?;
                let json = serde_json::to_string_pretty(viewer.current())
                    .map_err(|e| CliError::Other(format!("JSON serialization failed: {e}")))?;
                println!("{json}");
            }
            None => println!("{}", log.to_json()?),
        },
        ReplayFormat::Text => match turn {
            Some(turn) => print!("{}", ReplayViewer::new_at_turn(log, turn)?.render()),
            None => print_text_replay(log)?,
        },
    }

    Ok(())
}

fn print_text_replay(log: ReplayLog) -> Result<(), CliError> {
    let summary = render_summary(&log);
    if log.turn_count() == 0 {
        print!("{summary}");
        return Ok(());
    }

    let mut viewer = ReplayViewer::new(log)?;
    loop {
        println!("{}", viewer.render());
        if viewer.is_at_end() {
            break;
        }
        viewer.step_forward()?;
    }
    print!("{summary}");
    Ok(())
}
