//! Plain-text rendering of replay entries.
//!
//! Intended for terminals and for pasting into reports. One block per turn:
//!
//! ```text
//! === TURN 4 OF 100 (9x7) ===
//! Action: Robot A -> attack
//! - Robot A at (3, 3): HP 100, SP 30
//! - Robot B at (4, 3): HP 90, SP 40 [defending]
//! ```

// format! with push_str keeps each line readable
#![allow(clippy::format_push_string)]

use crate::battle::BattleConfig;
use crate::replay::{ReplayLog, TurnRecord};

/// Render one recorded turn.
#[must_use]
pub fn render_turn(settings: &BattleConfig, record: &TurnRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "=== TURN {} OF {} ({}x{}) ===\n",
        record.turn, settings.max_turn, settings.x_max, settings.y_max
    ));

    match (&record.action.robot_name, &record.action.action) {
        (Some(robot), Some(action)) => {
            output.push_str(&format!("Action: {robot} -> {action}\n"));
        }
        _ => output.push_str("Action: none\n"),
    }

    for robot in &record.robots {
        output.push_str(&format!(
            "- {} at {}: HP {}, SP {}",
            robot.name, robot.position, robot.hp, robot.sp
        ));
        if robot.defense_mode {
            output.push_str(" [defending]");
        }
        if robot.hp <= 0.0 {
            output.push_str(" [destroyed]");
        }
        output.push('\n');
    }

    output
}

/// Render the outcome of a whole log.
#[must_use]
pub fn render_summary(log: &ReplayLog) -> String {
    let mut output = String::new();
    let settings = log.settings();

    output.push_str(&format!(
        "Battle on {}x{} grid, {} of {} turns played\n",
        settings.x_max,
        settings.y_max,
        log.turn_count(),
        settings.max_turn
    ));

    match (log.final_state(), log.winner()) {
        (Some(robots), Some(winner)) => {
            for robot in robots {
                output.push_str(&format!(
                    "  {}: HP {}, SP {} at {}\n",
                    robot.name, robot.hp, robot.sp, robot.position
                ));
            }
            output.push_str(&format!("  Winner: {}\n", robots[winner.index()].name));
        }
        _ => output.push_str("  No turns recorded\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, RobotState};
    use crate::replay::ActionRecord;

    fn record() -> TurnRecord {
        TurnRecord {
            turn: 4,
            robots: [
                RobotState {
                    name: "Robot A".to_string(),
                    position: Position::new(3, 3),
                    hp: 100.0,
                    sp: 30,
                    defense_mode: false,
                },
                RobotState {
                    name: "Robot B".to_string(),
                    position: Position::new(4, 3),
                    hp: 90.0,
                    sp: 40,
                    defense_mode: true,
                },
            ],
            action: ActionRecord::new("Robot A", "attack"),
        }
    }

    #[test]
    fn test_render_turn() {
        let text = render_turn(&BattleConfig::default(), &record());
        assert_eq!(
            text,
            "=== TURN 4 OF 100 (9x7) ===\n\
             Action: Robot A -> attack\n\
             - Robot A at (3, 3): HP 100, SP 30\n\
             - Robot B at (4, 3): HP 90, SP 40 [defending]\n"
        );
    }

    #[test]
    fn test_render_turn_without_action() {
        let mut record = record();
        record.action = ActionRecord {
            robot_name: None,
            action: None,
        };
        assert!(render_turn(&BattleConfig::default(), &record).contains("Action: none"));
    }

    #[test]
    fn test_render_summary() {
        let mut log = ReplayLog::new(BattleConfig::default());
        assert!(render_summary(&log).contains("No turns recorded"));

        log.push(record());
        let text = render_summary(&log);
        assert!(text.contains("1 of 100 turns played"));
        assert!(text.contains("Winner: Robot A"));
    }
}
