//! Turn scheduler.
//!
//! Provides a pure function interface: `(config, contenders) -> BattleReport`
//!
//! The scheduler handles:
//! - Strict turn alternation (first robot on even turns, second on odd)
//! - Clearing defense mode at the start of the acting robot's turn
//! - Querying the acting robot's policy and resolving its action
//! - Appending one replay entry per executed turn
//! - Picking the winner once a robot is down or the turn limit is hit

mod config;

pub use config::{BattleConfig, DEFAULT_FIRST_START, DEFAULT_SECOND_START};

use std::fmt;

use tracing::{debug, error, info};

use crate::error::{BattleError, BattleResult};
use crate::game::{resolve, Action, Position, Robot, RobotState, RobotStats, UnknownActionToken};
use crate::policy::{GameInfo, Memo, Policy};
use crate::replay::{ActionRecord, ReplayLog, TurnRecord};
use crate::sink::{LogSink, NullSink};

/// Which of the two robots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Acts on even turns.
    First,
    /// Acts on odd turns. Wins ties.
    Second,
}

impl Side {
    /// The side that acts on `turn`.
    #[must_use]
    pub const fn for_turn(turn: u32) -> Self {
        if turn.is_multiple_of(2) { Side::First } else { Side::Second }
    }

    /// Index into two-element robot arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Winner by final health.
    ///
    /// Strictly more health wins; on equal health the second robot wins.
    /// The asymmetry is part of the game's contract.
    #[must_use]
    pub fn by_health(first_hp: f64, second_hp: f64) -> Self {
        if first_hp > second_hp { Side::First } else { Side::Second }
    }
}

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    /// More turns may be played.
    Running,
    /// The battle is over.
    Finished(Side),
}

/// One participant: a name, a start cell and a policy.
pub struct Contender<'p> {
    /// Robot name, unique within the battle.
    pub name: String,
    /// Start cell.
    pub start: Position,
    /// Robot constants.
    pub stats: RobotStats,
    /// Decision function.
    pub policy: &'p dyn Policy,
}

impl fmt::Debug for Contender<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contender")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<'p> Contender<'p> {
    /// Create a contender with default stats.
    #[must_use]
    pub fn new(name: impl Into<String>, start: Position, policy: &'p dyn Policy) -> Self {
        Self {
            name: name.into(),
            start,
            stats: RobotStats::default(),
            policy,
        }
    }

    /// Replace the robot constants.
    #[must_use]
    pub fn with_stats(mut self, stats: RobotStats) -> Self {
        self.stats = stats;
        self
    }
}

/// Final result of a battle.
#[derive(Debug, Clone)]
pub struct BattleReport {
    /// The winning side.
    pub winner: Side,
    /// The winning robot's name.
    pub winner_name: String,
    /// Final state of both robots, first robot first.
    pub robots: [RobotState; 2],
    /// Number of turns executed.
    pub turns_played: u32,
    /// The full replay log.
    pub replay: ReplayLog,
}

impl BattleReport {
    /// Final state of the winning robot.
    #[must_use]
    pub fn winner_state(&self) -> &RobotState {
        &self.robots[self.winner.index()]
    }
}

/// Run a complete battle without a text log.
///
/// # Errors
///
/// Returns an error if the setup is invalid or a policy answers with an
/// unknown action token.
pub fn run_battle(
    config: BattleConfig,
    first: Contender<'_>,
    second: Contender<'_>,
) -> BattleResult<BattleReport> {
    Battle::new(config, first, second, NullSink)?.run()
}

/// A battle in progress.
///
/// The sink is owned (or borrowed, via `&mut S`) for exactly this battle and
/// is flushed by [`Battle::run`] on every exit path.
pub struct Battle<'p, S: LogSink> {
    config: BattleConfig,
    robots: [Robot; 2],
    policies: [&'p dyn Policy; 2],
    memos: [Memo; 2],
    turn: u32,
    status: BattleStatus,
    aborted: bool,
    replay: ReplayLog,
    sink: S,
}

impl<S: LogSink> fmt::Debug for Battle<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("config", &self.config)
            .field("robots", &self.robots)
            .field("turn", &self.turn)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl<'p, S: LogSink> Battle<'p, S> {
    /// Set up a battle.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, a start cell is outside the
    /// grid, or both robots share a name. Overlapping starts are allowed.
    pub fn new(
        config: BattleConfig,
        first: Contender<'p>,
        second: Contender<'p>,
        sink: S,
    ) -> BattleResult<Self> {
        config.validate()?;
        config.check_start(&first.name, first.start)?;
        config.check_start(&second.name, second.start)?;
        if first.name == second.name {
            return Err(BattleError::DuplicateName(first.name));
        }

        let robots = [
            Robot::with_stats(first.name, first.start, first.stats),
            Robot::with_stats(second.name, second.start, second.stats),
        ];

        Ok(Self {
            config,
            robots,
            policies: [first.policy, second.policy],
            memos: [Memo::new(), Memo::new()],
            turn: 0,
            status: BattleStatus::Running,
            aborted: false,
            replay: ReplayLog::new(config),
            sink,
        })
    }

    /// Battle settings.
    #[must_use]
    pub const fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Both robots, first robot first.
    #[must_use]
    pub const fn robots(&self) -> &[Robot; 2] {
        &self.robots
    }

    /// Index of the next turn to play.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Current scheduler state.
    #[must_use]
    pub const fn status(&self) -> BattleStatus {
        self.status
    }

    /// The replay log so far.
    #[must_use]
    pub const fn replay(&self) -> &ReplayLog {
        &self.replay
    }

    /// Both robots alive and turns left.
    fn can_continue(&self) -> bool {
        self.robots.iter().all(Robot::is_alive) && self.turn < self.config.max_turn
    }

    /// Play one turn, or finish the battle if the guard fails.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::UnknownAction`] if the acting policy answers
    /// with a token outside the vocabulary. The battle is then aborted and
    /// every later call returns [`BattleError::Aborted`].
    pub fn step(&mut self) -> BattleResult<BattleStatus> {
        if self.aborted {
            return Err(BattleError::Aborted);
        }
        if let BattleStatus::Finished(_) = self.status {
            return Ok(self.status);
        }
        if !self.can_continue() {
            return Ok(self.finish());
        }

        let turn = self.turn;
        let side = Side::for_turn(turn);
        let (actor, enemy) = split(&mut self.robots, side);

        debug!(turn, robot = actor.name(), "turn start");
        self.sink
            .record(turn, &format!("--- Turn {turn} : {} turn ---", actor.name()));

        actor.start_turn();

        let info = GameInfo {
            enemy_position: enemy.position(),
            turn,
            x_max: self.config.x_max,
            y_max: self.config.y_max,
        };
        let token = self.policies[side.index()].decide(
            &actor.state(),
            &info,
            &mut self.memos[side.index()],
        );

        let action = match token.parse::<Action>() {
            Ok(action) => action,
            Err(UnknownActionToken(token)) => {
                error!(turn, robot = actor.name(), token = %token, "unknown action, aborting battle");
                self.aborted = true;
                return Err(BattleError::UnknownAction {
                    robot: actor.name().to_string(),
                    token,
                    turn,
                });
            }
        };

        let outcome = resolve(action, actor, enemy, self.config.x_max, self.config.y_max);
        debug!(turn, action = %action, applied = outcome.applied, "action resolved");
        self.sink.record(turn, &outcome.description);

        let actor_name = actor.name().to_string();
        let robots = [self.robots[0].state(), self.robots[1].state()];
        for robot in &robots {
            self.sink.record(
                turn,
                &format!(" - {} : HP: {}, SP: {}", robot.name, robot.hp, robot.sp),
            );
        }
        self.replay.push(TurnRecord {
            turn,
            robots,
            action: ActionRecord::new(actor_name, action.as_str()),
        });

        self.turn += 1;
        Ok(BattleStatus::Running)
    }

    /// Decide the winner and close the battle.
    fn finish(&mut self) -> BattleStatus {
        let winner = Side::by_health(self.robots[0].hp(), self.robots[1].hp());
        let name = self.robots[winner.index()].name();
        info!(winner = name, turns = self.turn, "battle finished");
        self.sink.record(self.turn, &format!("{name} wins!"));
        self.status = BattleStatus::Finished(winner);
        self.status
    }

    fn play_out(&mut self) -> BattleResult<Side> {
        loop {
            if let BattleStatus::Finished(winner) = self.step()? {
                return Ok(winner);
            }
        }
    }

    /// Play the battle to the end.
    ///
    /// The sink is flushed whether the battle finishes or aborts. An abort
    /// takes precedence over a flush failure.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::UnknownAction`] if a policy breaks its
    /// contract, or [`BattleError::Log`] if the sink cannot be flushed.
    pub fn run(mut self) -> BattleResult<BattleReport> {
        let played = self.play_out();
        let flushed = self.sink.flush();
        let winner = played?;
        flushed?;

        let robots = [self.robots[0].state(), self.robots[1].state()];
        Ok(BattleReport {
            winner,
            winner_name: robots[winner.index()].name.clone(),
            robots,
            turns_played: self.turn,
            replay: self.replay,
        })
    }
}

/// Borrow the acting robot and its enemy.
fn split(robots: &mut [Robot; 2], side: Side) -> (&mut Robot, &mut Robot) {
    let [first, second] = robots;
    match side {
        Side::First => (first, second),
        Side::Second => (second, first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Defender, Rester, Scripted};
    use crate::sink::MemorySink;

    fn always(token: &'static str) -> impl Fn(&RobotState, &GameInfo, &mut Memo) -> String {
        move |_: &RobotState, _: &GameInfo, _: &mut Memo| token.to_string()
    }

    #[test]
    fn test_side_for_turn() {
        assert_eq!(Side::for_turn(0), Side::First);
        assert_eq!(Side::for_turn(1), Side::Second);
        assert_eq!(Side::for_turn(100), Side::First);
        assert_eq!(Side::First.opponent(), Side::Second);
    }

    #[test]
    fn test_tie_goes_to_second_robot() {
        // Intentional asymmetry: equal health always favours the second robot.
        assert_eq!(Side::by_health(100.0, 100.0), Side::Second);
        assert_eq!(Side::by_health(-10.0, -10.0), Side::Second);
        assert_eq!(Side::by_health(50.5, 50.0), Side::First);
        assert_eq!(Side::by_health(50.0, 50.5), Side::Second);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Battle::new(
            BattleConfig::default(),
            Contender::new("Twin", DEFAULT_FIRST_START, &Rester),
            Contender::new("Twin", DEFAULT_SECOND_START, &Rester),
            NullSink,
        );
        assert!(matches!(result, Err(BattleError::DuplicateName(name)) if name == "Twin"));
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let result = Battle::new(
            BattleConfig::default(),
            Contender::new("A", Position::new(9, 3), &Rester),
            Contender::new("B", DEFAULT_SECOND_START, &Rester),
            NullSink,
        );
        assert!(matches!(result, Err(BattleError::StartOutOfBounds { .. })));
    }

    #[test]
    fn test_overlapping_starts_are_allowed() {
        let battle = Battle::new(
            BattleConfig::default(),
            Contender::new("A", Position::new(4, 3), &Rester),
            Contender::new("B", Position::new(4, 3), &Rester),
            NullSink,
        );
        assert!(battle.is_ok());
    }

    #[test]
    fn test_step_alternates_by_parity() {
        let mut battle = Battle::new(
            BattleConfig::default(),
            Contender::new("A", DEFAULT_FIRST_START, &Rester),
            Contender::new("B", DEFAULT_SECOND_START, &Rester),
            NullSink,
        )
        .unwrap();

        for turn in 0..6u32 {
            assert_eq!(battle.step().unwrap(), BattleStatus::Running);
            let record = battle.replay().turns().last().unwrap();
            assert_eq!(record.turn, turn);
            let expected = if turn.is_multiple_of(2) { "A" } else { "B" };
            assert_eq!(record.action.robot_name.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_defense_cleared_at_own_turn_start() {
        let seen = std::cell::RefCell::new(Vec::new());
        let watcher = |me: &RobotState, _: &GameInfo, _: &mut Memo| {
            seen.borrow_mut().push(me.defense_mode);
            "defend".to_string()
        };
        let mut battle = Battle::new(
            BattleConfig::default(),
            Contender::new("A", DEFAULT_FIRST_START, &watcher),
            Contender::new("B", DEFAULT_SECOND_START, &Rester),
            NullSink,
        )
        .unwrap();

        for _ in 0..6 {
            battle.step().unwrap();
        }
        // Defense is set on every one of A's turns, yet A never observes it.
        assert_eq!(*seen.borrow(), [false, false, false]);
        // It stays up through B's turn.
        assert!(battle.replay().turns()[1].robots[0].defense_mode);
    }

    #[test]
    fn test_unknown_token_aborts() {
        let mut sink = MemorySink::new();
        let dance = always("dance");
        let result = Battle::new(
            BattleConfig::default(),
            Contender::new("A", DEFAULT_FIRST_START, &Rester),
            Contender::new("B", DEFAULT_SECOND_START, &dance),
            &mut sink,
        )
        .unwrap()
        .run();

        match result {
            Err(BattleError::UnknownAction { robot, token, turn }) => {
                assert_eq!(robot, "B");
                assert_eq!(token, "dance");
                assert_eq!(turn, 1);
            }
            other => panic!("expected UnknownAction, got {other:?}"),
        }
        // The sink is still flushed on the fatal path.
        assert_eq!(sink.flush_count(), 1);
        assert!(!sink.lines().iter().any(|l| l.contains("wins!")));
    }

    #[test]
    fn test_step_after_abort() {
        let dance = always("dance");
        let mut battle = Battle::new(
            BattleConfig::default(),
            Contender::new("A", DEFAULT_FIRST_START, &dance),
            Contender::new("B", DEFAULT_SECOND_START, &Rester),
            NullSink,
        )
        .unwrap();

        assert!(matches!(battle.step(), Err(BattleError::UnknownAction { turn: 0, .. })));
        assert!(matches!(battle.step(), Err(BattleError::Aborted)));
        assert_eq!(battle.replay().turn_count(), 0);
    }

    #[test]
    fn test_text_log_lines() {
        let mut sink = MemorySink::new();
        let config = BattleConfig {
            max_turn: 2,
            ..BattleConfig::default()
        };
        let report = Battle::new(
            config,
            Contender::new("Robot A", DEFAULT_FIRST_START, &Rester),
            Contender::new("Robot B", DEFAULT_SECOND_START, &Rester),
            &mut sink,
        )
        .unwrap()
        .run()
        .unwrap();

        assert_eq!(report.winner, Side::Second);
        assert_eq!(
            sink.lines(),
            [
                "Turn 0: --- Turn 0 : Robot A turn ---",
                "Turn 0: Robot A rests and recovers 15 SP. Total SP: 65",
                "Turn 0:  - Robot A : HP: 100, SP: 65",
                "Turn 0:  - Robot B : HP: 100, SP: 50",
                "Turn 1: --- Turn 1 : Robot B turn ---",
                "Turn 1: Robot B rests and recovers 15 SP. Total SP: 65",
                "Turn 1:  - Robot A : HP: 100, SP: 65",
                "Turn 1:  - Robot B : HP: 100, SP: 65",
                "Turn 2: Robot B wins!",
            ]
        );
    }

    #[test]
    fn test_battle_stops_when_robot_destroyed() {
        // Two adjacent robots; A attacks every turn and B only defends.
        let config = BattleConfig {
            max_turn: 1000,
            ..BattleConfig::default()
        };
        let attacker = Scripted::new([Action::Attack, Action::Rest]);
        let report = run_battle(
            config,
            Contender::new("A", Position::new(3, 3), &attacker),
            Contender::new("B", Position::new(4, 3), &Defender),
        )
        .unwrap();

        assert_eq!(report.winner, Side::First);
        assert!(report.robots[1].hp <= 0.0);
        assert!(report.turns_played < 1000);
        assert_eq!(report.replay.turn_count(), report.turns_played as usize);
    }
}
