//! Batch runner for repeated battles.
//!
//! Provides a pure function interface: `(config, policy factory) -> results`
//!
//! Every round builds its own robots, memos, policies and replay log, so
//! rounds share no mutable state and run in parallel with rayon. Results
//! come back in round order.

use rayon::prelude::*;

use crate::battle::{
    run_battle, BattleConfig, BattleReport, Contender, Side, DEFAULT_FIRST_START,
    DEFAULT_SECOND_START,
};
use crate::error::BattleError;
use crate::game::{Position, RobotStats};
use crate::policy::Policy;

/// A fresh pair of policies for one round.
pub type PolicyPair = (Box<dyn Policy>, Box<dyn Policy>);

/// Configuration for a batch of rounds.
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    /// Settings shared by every round.
    pub battle: BattleConfig,
    /// Number of rounds to play.
    pub rounds: u32,
    /// Robot names, first robot first.
    pub names: [String; 2],
    /// Start cells, first robot first.
    pub starts: [Position; 2],
    /// Robot constants for both robots.
    pub stats: RobotStats,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            rounds: 1,
            names: ["Robot A".to_string(), "Robot B".to_string()],
            starts: [DEFAULT_FIRST_START, DEFAULT_SECOND_START],
            stats: RobotStats::default(),
        }
    }
}

/// Result of one round.
#[derive(Debug)]
pub struct RoundResult {
    /// Zero-based round index.
    pub round: u32,
    /// The battle report, or why the battle did not finish.
    pub outcome: Result<BattleReport, BattleError>,
}

/// Play one round with the given policies.
///
/// # Errors
///
/// Returns the battle's error unchanged.
pub fn run_round(
    config: &TournamentConfig,
    first: &dyn Policy,
    second: &dyn Policy,
) -> Result<BattleReport, BattleError> {
    let [first_name, second_name] = &config.names;
    run_battle(
        config.battle,
        Contender::new(first_name.as_str(), config.starts[0], first).with_stats(config.stats),
        Contender::new(second_name.as_str(), config.starts[1], second).with_stats(config.stats),
    )
}

/// Run every round, keeping each report.
///
/// `factory` is called once per round with the round index.
#[must_use]
pub fn run_rounds<F>(config: &TournamentConfig, factory: F) -> Vec<RoundResult>
where
    F: Fn(u32) -> PolicyPair + Sync,
{
    (0..config.rounds)
        .into_par_iter()
        .map(|round| {
            let (first, second) = factory(round);
            RoundResult {
                round,
                outcome: run_round(config, first.as_ref(), second.as_ref()),
            }
        })
        .collect()
}

/// Run every round and keep only aggregate statistics.
#[must_use]
pub fn run_stats<F>(config: &TournamentConfig, factory: F) -> TournamentStats
where
    F: Fn(u32) -> PolicyPair + Sync,
{
    // Each thread folds into its own stats; merged at the end.
    (0..config.rounds)
        .into_par_iter()
        .fold(TournamentStats::default, |mut stats, round| {
            let (first, second) = factory(round);
            stats.add_outcome(&run_round(config, first.as_ref(), second.as_ref()));
            stats
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        })
}

/// Aggregated results over many rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TournamentStats {
    /// Rounds that produced a winner.
    pub rounds_played: u64,
    /// Wins per side, first robot first.
    pub wins: [u64; 2],
    /// Rounds aborted by an error.
    pub aborted: u64,
    /// Sum of final health per side.
    total_hp: [f64; 2],
    /// Sum of squared final health per side.
    hp_sq_sums: [f64; 2],
    /// Total turns across finished rounds.
    total_turns: u64,
}

impl TournamentStats {
    /// Build stats from kept round results.
    #[must_use]
    pub fn from_results(results: &[RoundResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.add_outcome(&result.outcome);
        }
        stats
    }

    /// Add one round.
    pub fn add_outcome(&mut self, outcome: &Result<BattleReport, BattleError>) {
        let Ok(report) = outcome else {
            self.aborted += 1;
            return;
        };
        self.rounds_played += 1;
        self.wins[report.winner.index()] += 1;
        self.total_turns += u64::from(report.turns_played);
        for (i, robot) in report.robots.iter().enumerate() {
            self.total_hp[i] += robot.hp;
            self.hp_sq_sums[i] += robot.hp * robot.hp;
        }
    }

    /// Fold another set of stats into this one.
    pub fn merge(&mut self, other: &Self) {
        self.rounds_played += other.rounds_played;
        self.aborted += other.aborted;
        self.total_turns += other.total_turns;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.total_hp[i] += other.total_hp[i];
            self.hp_sq_sums[i] += other.hp_sq_sums[i];
        }
    }

    /// Wins for `side`.
    #[must_use]
    pub fn wins_for(&self, side: Side) -> u64 {
        self.wins[side.index()]
    }

    /// Win rate for `side` over finished rounds (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, side: Side) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.wins_for(side) as f64 / self.rounds_played as f64
    }

    /// Average final health for `side`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_hp(&self, side: Side) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.total_hp[side.index()] / self.rounds_played as f64
    }

    /// Standard deviation of final health for `side`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hp_std_dev(&self, side: Side) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        let n = self.rounds_played as f64;
        let mean = self.avg_hp(side);
        let variance = (self.hp_sq_sums[side.index()] / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average battle length in turns.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_turns(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.rounds_played as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Chaser, Rester, Scripted};

    fn chasers(_: u32) -> PolicyPair {
        (Box::new(Chaser), Box::new(Chaser))
    }

    #[test]
    fn test_tournament_config_default() {
        let config = TournamentConfig::default();
        assert_eq!(config.rounds, 1);
        assert_eq!(config.names[0], "Robot A");
        assert_eq!(config.starts, [DEFAULT_FIRST_START, DEFAULT_SECOND_START]);
    }

    #[test]
    fn test_rounds_are_independent_and_ordered() {
        let config = TournamentConfig {
            rounds: 5,
            ..TournamentConfig::default()
        };
        let results = run_rounds(&config, chasers);
        assert_eq!(results.len(), 5);

        let first = results[0].outcome.as_ref().unwrap();
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.round as usize, i);
            let report = result.outcome.as_ref().unwrap();
            // Deterministic policies produce identical rounds.
            assert_eq!(report.replay, first.replay);
        }
    }

    #[test]
    fn test_stats_match_results() {
        let config = TournamentConfig {
            rounds: 8,
            ..TournamentConfig::default()
        };
        let kept = TournamentStats::from_results(&run_rounds(&config, chasers));
        let folded = run_stats(&config, chasers);
        assert_eq!(kept.rounds_played, 8);
        assert_eq!(kept.wins, folded.wins);
        assert_eq!(kept.rounds_played, folded.rounds_played);
        assert!((kept.avg_turns() - folded.avg_turns()).abs() < 1e-9);
    }

    #[test]
    fn test_resting_rounds_go_to_second_robot() {
        let config = TournamentConfig {
            rounds: 3,
            ..TournamentConfig::default()
        };
        let stats = run_stats(&config, |_| -> PolicyPair { (Box::new(Rester), Box::new(Rester)) });
        assert_eq!(stats.wins_for(Side::Second), 3);
        assert!((stats.win_rate(Side::Second) - 1.0).abs() < f64::EPSILON);
        assert!((stats.avg_turns() - 100.0).abs() < f64::EPSILON);
        assert!((stats.avg_hp(Side::First) - 100.0).abs() < f64::EPSILON);
        assert!(stats.hp_std_dev(Side::First).abs() < 1e-9);
    }

    #[test]
    fn test_aborted_rounds_are_counted() {
        let config = TournamentConfig {
            rounds: 4,
            ..TournamentConfig::default()
        };
        let stats = run_stats(&config, |round| -> PolicyPair {
            let second: Box<dyn Policy> = if round.is_multiple_of(2) {
                Box::new(Scripted::from_tokens(["dance"]))
            } else {
                Box::new(Rester)
            };
            (Box::new(Rester), second)
        });
        assert_eq!(stats.aborted, 2);
        assert_eq!(stats.rounds_played, 2);
    }

    #[test]
    fn test_empty_stats() {
        let stats = TournamentStats::default();
        assert!(stats.win_rate(Side::First).abs() < f64::EPSILON);
        assert!(stats.avg_turns().abs() < f64::EPSILON);
    }
}
