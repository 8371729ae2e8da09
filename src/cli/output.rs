//! Output formatting utilities for CLI.

// format! with push_str keeps each line readable
#![allow(clippy::format_push_string)]

use pcrb::tournament::TournamentStats;
use pcrb::{BattleReport, RobotState, Side};
use serde::Serialize;

/// JSON-serializable battle result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBattleResult<'a> {
    /// Winning robot's name.
    pub(super) winner: &'a str,
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Final state of both robots.
    pub(super) robots: &'a [RobotState; 2],
}

impl<'a> JsonBattleResult<'a> {
    /// Create from a `BattleReport`.
    pub(super) fn from_report(report: &'a BattleReport) -> Self {
        Self {
            winner: &report.winner_name,
            turns_played: report.turns_played,
            robots: &report.robots,
        }
    }
}

/// Format a battle result as human-readable text.
pub(super) fn format_text(report: &BattleReport) -> String {
    let mut output = String::new();

    output.push_str("Battle Result\n");
    output.push_str(&format!("  Winner: {}\n", report.winner_name));
    output.push_str(&format!("  Turns: {}\n\n", report.turns_played));

    for robot in &report.robots {
        output.push_str(&format!(
            "  {}: HP {}, SP {} at {}",
            robot.name, robot.hp, robot.sp, robot.position
        ));
        if robot.hp <= 0.0 {
            output.push_str(" [destroyed]");
        }
        output.push('\n');
    }

    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Rounds that produced a winner.
    rounds_played: u64,
    /// Rounds aborted by a policy error.
    aborted: u64,
    /// Per-robot statistics.
    robots: Vec<JsonTournamentRobot>,
    /// Average battle length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-robot tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentRobot {
    /// Robot slot (1 or 2).
    slot: usize,
    /// Policy name.
    policy: String,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average final health.
    avg_hp: f64,
    /// Final health standard deviation.
    hp_std_dev: f64,
}

impl JsonTournamentResult {
    /// Create from stats and policy names.
    pub(super) fn from_stats(stats: &TournamentStats, policies: &[String; 2]) -> Self {
        let robots = [Side::First, Side::Second]
            .into_iter()
            .map(|side| JsonTournamentRobot {
                slot: side.index() + 1,
                policy: policies[side.index()].clone(),
                wins: stats.wins_for(side),
                win_rate: stats.win_rate(side),
                avg_hp: stats.avg_hp(side),
                hp_std_dev: stats.hp_std_dev(side),
            })
            .collect();

        Self {
            rounds_played: stats.rounds_played,
            aborted: stats.aborted,
            robots,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, policies: &[String; 2]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} rounds)\n", stats.rounds_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for side in [Side::First, Side::Second] {
        output.push_str(&format!(
            "  Robot {} ({}): {:.1}% ({} wins)\n",
            side.index() + 1,
            policies[side.index()],
            stats.win_rate(side) * 100.0,
            stats.wins_for(side)
        ));
    }
    if stats.aborted > 0 {
        output.push_str(&format!("  Aborted: {}\n", stats.aborted));
    }

    output.push_str("\nAverage Final HP:\n");
    for side in [Side::First, Side::Second] {
        output.push_str(&format!(
            "  Robot {} ({}): {:.1} (+/- {:.1})\n",
            side.index() + 1,
            policies[side.index()],
            stats.avg_hp(side),
            stats.hp_std_dev(side)
        ));
    }

    output.push_str(&format!("\nAverage Battle Length: {:.0} turns\n", stats.avg_turns()));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, policies: &[String; 2]) -> String {
    let mut output = String::new();

    output.push_str("robot,policy,wins,win_rate,avg_hp,hp_std_dev\n");

    for side in [Side::First, Side::Second] {
        output.push_str(&format!(
            "{},{},{},{:.4},{:.2},{:.2}\n",
            side.index() + 1,
            policies[side.index()],
            stats.wins_for(side),
            stats.win_rate(side),
            stats.avg_hp(side),
            stats.hp_std_dev(side)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcrb::policy::Rester;
    use pcrb::tournament::{run_stats, PolicyPair, TournamentConfig};
    use pcrb::{run_battle, BattleConfig, Contender, DEFAULT_FIRST_START, DEFAULT_SECOND_START};

    fn resting_report() -> BattleReport {
        run_battle(
            BattleConfig {
                max_turn: 4,
                ..BattleConfig::default()
            },
            Contender::new("Robot A", DEFAULT_FIRST_START, &Rester),
            Contender::new("Robot B", DEFAULT_SECOND_START, &Rester),
        )
        .unwrap()
    }

    fn names() -> [String; 2] {
        ["rester".to_string(), "rester".to_string()]
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&resting_report());
        assert!(text.contains("Winner: Robot B"));
        assert!(text.contains("Turns: 4"));
        assert!(text.contains("Robot A: HP 100, SP 80 at (1, 3)"));
    }

    #[test]
    fn test_json_battle_result() {
        let report = resting_report();
        let json = serde_json::to_value(JsonBattleResult::from_report(&report)).unwrap();
        assert_eq!(json["winner"], "Robot B");
        assert_eq!(json["turns_played"], 4);
        assert_eq!(json["robots"][1]["position"], serde_json::json!([7, 3]));
    }

    #[test]
    fn test_tournament_formats() {
        let config = TournamentConfig {
            rounds: 2,
            ..TournamentConfig::default()
        };
        let stats = run_stats(&config, |_| -> PolicyPair { (Box::new(Rester), Box::new(Rester)) });

        let text = format_tournament_text(&stats, &names());
        assert!(text.contains("Tournament Results (2 rounds)"));
        assert!(text.contains("Robot 2 (rester): 100.0% (2 wins)"));

        let csv = format_tournament_csv(&stats, &names());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2,rester,2,1.0000,100.00,0.00");

        let json = serde_json::to_value(JsonTournamentResult::from_stats(&stats, &names())).unwrap();
        assert_eq!(json["rounds_played"], 2);
        assert_eq!(json["robots"][0]["wins"], 0);
    }
}
