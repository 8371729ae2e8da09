// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Pcrb: a deterministic, turn-based duel between two programmable robots.
//!
//! Two robots share a small grid. Each turn one of them asks its policy for
//! an action token, the action is resolved against the game rules, and the
//! complete state of both robots is appended to a replay log. The battle
//! ends when a robot is destroyed or the turn limit is reached.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (pcrb) / Tournament Runner    │
//! ├─────────────────────────────────────┤
//! │   Battle Scheduler  →  Replay Log   │
//! │          │          →  Log Sink     │
//! ├─────────────────────────────────────┤
//! │   Game Rules (robots, actions)      │
//! ├─────────────────────────────────────┤
//! │   Policies (built-in or closures)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pcrb::{run_battle, BattleConfig, Contender, Side};
//! use pcrb::policy::Rester;
//!
//! let report = run_battle(
//!     BattleConfig::default(),
//!     Contender::new("Robot A", pcrb::DEFAULT_FIRST_START, &Rester),
//!     Contender::new("Robot B", pcrb::DEFAULT_SECOND_START, &Rester),
//! )
//! .unwrap();
//!
//! // Nobody took damage, so the tie goes to the second robot.
//! assert_eq!(report.winner, Side::Second);
//! assert_eq!(report.turns_played, 100);
//! ```

pub mod battle;
pub mod error;
pub mod game;
pub mod policy;
pub mod replay;
pub mod sink;
pub mod tournament;

pub use battle::{
    run_battle, Battle, BattleConfig, BattleReport, BattleStatus, Contender, Side,
    DEFAULT_FIRST_START, DEFAULT_SECOND_START,
};
pub use error::{BattleError, BattleResult};

// Re-export key game types at crate root for convenience
pub use game::{Action, Direction, Position, Robot, RobotState, RobotStats};
pub use policy::{GameInfo, Memo, Policy};
pub use replay::{ReplayError, ReplayLog, TurnRecord};
pub use sink::{LogSink, MemorySink, NullSink, WriterSink};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports_run_a_battle() {
        let report = run_battle(
            BattleConfig {
                max_turn: 2,
                ..BattleConfig::default()
            },
            Contender::new("A", DEFAULT_FIRST_START, &policy::Rester),
            Contender::new("B", DEFAULT_SECOND_START, &policy::Rester),
        )
        .unwrap();
        assert_eq!(report.turns_played, 2);
        assert_eq!(report.replay.turn_count(), 2);
    }
}
