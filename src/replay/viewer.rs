//! Stepping through a recorded battle.

use crate::replay::{render_turn, ReplayError, ReplayLog, TurnRecord};

/// Cursor over the turns of a replay log.
///
/// Because every entry is a full snapshot, moving in either direction or
/// jumping to any turn is a plain index change.
#[derive(Debug, Clone)]
pub struct ReplayViewer {
    log: ReplayLog,
    cursor: usize,
}

impl ReplayViewer {
    /// Open a log at its first turn.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::NoTurns`] if the log is empty.
    pub fn new(log: ReplayLog) -> Result<Self, ReplayError> {
        Self::new_at_turn(log, 0)
    }

    /// Open a log at a specific turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the log is empty or the turn was not played.
    pub fn new_at_turn(log: ReplayLog, turn: u32) -> Result<Self, ReplayError> {
        let mut viewer = Self { log, cursor: 0 };
        viewer.goto_turn(turn)?;
        Ok(viewer)
    }

    /// The underlying log.
    #[must_use]
    pub fn log(&self) -> &ReplayLog {
        &self.log
    }

    /// Index of the turn being shown.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.current().turn
    }

    /// The entry being shown.
    #[must_use]
    pub fn current(&self) -> &TurnRecord {
        &self.log.turns()[self.cursor]
    }

    /// True when showing the last recorded turn.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 == self.log.turn_count()
    }

    fn last_turn(&self) -> Result<u32, ReplayError> {
        let count = self.log.turn_count();
        if count == 0 {
            return Err(ReplayError::NoTurns);
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok((count - 1) as u32)
    }

    /// Advance one turn.
    ///
    /// # Errors
    ///
    /// Returns an error if already at the last turn.
    pub fn step_forward(&mut self) -> Result<&TurnRecord, ReplayError> {
        let next = self.turn() + 1;
        self.goto_turn(next)
    }

    /// Go back one turn.
    ///
    /// # Errors
    ///
    /// Returns an error if already at turn 0.
    pub fn step_backward(&mut self) -> Result<&TurnRecord, ReplayError> {
        let last = self.last_turn()?;
        let Some(previous) = self.turn().checked_sub(1) else {
            return Err(ReplayError::TurnOutOfBounds {
                requested: 0,
                last,
            });
        };
        self.goto_turn(previous)
    }

    /// Jump to a specific turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn was not played.
    pub fn goto_turn(&mut self, turn: u32) -> Result<&TurnRecord, ReplayError> {
        let last = self.last_turn()?;
        if turn > last {
            return Err(ReplayError::TurnOutOfBounds {
                requested: turn,
                last,
            });
        }
        self.cursor = turn as usize;
        Ok(self.current())
    }

    /// Render the current turn as text.
    #[must_use]
    pub fn render(&self) -> String {
        render_turn(self.log.settings(), self.current())
    }
}
