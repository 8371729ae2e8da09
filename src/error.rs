//! Error types for running a battle.

use std::io;

use thiserror::Error;

use crate::game::Position;

/// Everything that can stop a battle from producing a winner.
///
/// Illegal moves and attacks are not errors; they are logged no-ops. The
/// only in-battle failure is a policy answering with a token outside the
/// action vocabulary.
#[derive(Debug, Error)]
pub enum BattleError {
    /// The grid has no cells.
    #[error("grid must be at least 1x1, got {x_max}x{y_max}")]
    EmptyGrid {
        /// Configured width.
        x_max: u16,
        /// Configured height.
        y_max: u16,
    },

    /// A robot was placed outside the grid.
    #[error("{robot} starts at {position}, outside the {x_max}x{y_max} grid")]
    StartOutOfBounds {
        /// Offending robot.
        robot: String,
        /// Requested start cell.
        position: Position,
        /// Grid width.
        x_max: u16,
        /// Grid height.
        y_max: u16,
    },

    /// Both robots share a name.
    #[error("robot names must differ within a battle, both are {0:?}")]
    DuplicateName(String),

    /// A policy broke its contract. The battle was aborted.
    #[error("policy for {robot} returned unknown action {token:?} on turn {turn}")]
    UnknownAction {
        /// Robot whose policy answered.
        robot: String,
        /// The rejected token.
        token: String,
        /// Turn on which it happened.
        turn: u32,
    },

    /// A previous step already aborted this battle.
    #[error("battle was aborted by an earlier error")]
    Aborted,

    /// The battle log could not be written.
    #[error("battle log error: {0}")]
    Log(#[from] io::Error),
}

impl BattleError {
    /// True when the error is the fault of a policy rather than the setup or I/O.
    #[must_use]
    pub fn is_policy_error(&self) -> bool {
        matches!(self, Self::UnknownAction { .. })
    }
}

/// Result type for battle operations.
pub type BattleResult<T> = Result<T, BattleError>;
