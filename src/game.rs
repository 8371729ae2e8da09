//! Game layer for pcrb.
//!
//! Implements the combat rules for the two robots:
//! - Grid positions with clamped movement
//! - Robot health, stamina and defense mode
//! - The action vocabulary and its legality checks

mod action;
mod grid;
mod robot;
mod rules;

pub use action::{resolve, Action, UnknownActionToken};
pub use grid::{Direction, Position};
pub use robot::{Outcome, Robot, RobotState};
pub use rules::{RobotStats, INITIAL_HP, INITIAL_SP, MELEE_RANGE, RANGED_RANGE};
