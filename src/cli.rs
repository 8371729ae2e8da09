//! CLI command implementations for Pcrb.

pub(crate) mod policies;
pub(crate) mod replay;
pub(crate) mod run;
pub(crate) mod tournament;

mod output;

use clap::ValueEnum;
use pcrb::policy::{builtin, BUILTIN_POLICIES};
use pcrb::{BattleError, Policy, ReplayError};
use thiserror::Error;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// One text block per turn.
    Text,
    /// The log itself, re-serialized.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// A policy name that is not built in.
    #[error("unknown policy {name:?} (available: {available})")]
    UnknownPolicy {
        /// Requested name.
        name: String,
        /// Comma-separated built-in names.
        available: String,
    },

    /// Battle setup or policy contract failure.
    #[error(transparent)]
    Battle(#[from] BattleError),

    /// Replay load, save or validation failure.
    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// Terminal or file output failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else, already formatted.
    #[error("{0}")]
    Other(String),
}

/// Look up a built-in policy by name.
pub(crate) fn lookup_policy(name: &str) -> Result<Box<dyn Policy + Send + Sync>, CliError> {
    builtin(name).ok_or_else(|| CliError::UnknownPolicy {
        name: name.to_string(),
        available: BUILTIN_POLICIES
            .iter()
            .map(|(policy, _)| *policy)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_policy() {
        assert!(lookup_policy("chaser").is_ok());
        let err = lookup_policy("nope").err().unwrap();
        let message = err.to_string();
        assert!(message.contains("\"nope\""));
        assert!(message.contains("chaser"));
    }
}
