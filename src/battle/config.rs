//! Battle settings.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, BattleResult};
use crate::game::Position;

/// Default start cell for the first robot.
pub const DEFAULT_FIRST_START: Position = Position::new(1, 3);

/// Default start cell for the second robot.
pub const DEFAULT_SECOND_START: Position = Position::new(7, 3);

/// Settings that stay fixed for the whole battle.
///
/// This is also the `settings` header of every replay log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleConfig {
    /// The battle stops once this many turns have been played.
    pub max_turn: u32,
    /// Grid width.
    pub x_max: u16,
    /// Grid height.
    pub y_max: u16,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turn: 100,
            x_max: 9,
            y_max: 7,
        }
    }
}

impl BattleConfig {
    /// Check the grid has at least one cell.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::EmptyGrid`] when either dimension is zero.
    pub fn validate(&self) -> BattleResult<()> {
        if self.x_max == 0 || self.y_max == 0 {
            return Err(BattleError::EmptyGrid {
                x_max: self.x_max,
                y_max: self.y_max,
            });
        }
        Ok(())
    }

    /// Check a start cell lies inside the grid.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::StartOutOfBounds`] naming `robot`.
    pub fn check_start(&self, robot: &str, position: Position) -> BattleResult<()> {
        if position.in_bounds(self.x_max, self.y_max) {
            Ok(())
        } else {
            Err(BattleError::StartOutOfBounds {
                robot: robot.to_string(),
                position,
                x_max: self.x_max,
                y_max: self.y_max,
            })
        }
    }
}
