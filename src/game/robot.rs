//! Robot state and action primitives.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::rules::{MELEE_RANGE, RANGED_RANGE};
use crate::game::{Direction, Position, RobotStats};

/// Public snapshot of a robot.
///
/// This is what a policy sees of itself and what every replay entry
/// records for both robots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotState {
    /// Robot name, unique within one battle.
    pub name: String,
    /// Current cell.
    pub position: Position,
    /// Health. Not floored at zero.
    pub hp: f64,
    /// Stamina. Unbounded above.
    pub sp: u64,
    /// Whether incoming damage is currently reduced.
    pub defense_mode: bool,
}

/// Result of attempting one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the action took effect. Rejected actions leave all state untouched.
    pub applied: bool,
    /// Human-readable description for the battle log.
    pub description: String,
}

impl Outcome {
    fn applied(description: String) -> Self {
        Self {
            applied: true,
            description,
        }
    }

    fn rejected(description: String) -> Self {
        Self {
            applied: false,
            description,
        }
    }
}

/// One of the two combatants.
#[derive(Debug, Clone)]
pub struct Robot {
    name: String,
    position: Position,
    hp: f64,
    sp: u64,
    defense_mode: bool,
    stats: RobotStats,
}

impl Robot {
    /// Create a robot with the default stats.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self::with_stats(name, position, RobotStats::default())
    }

    /// Create a robot with custom stats.
    #[must_use]
    pub fn with_stats(name: impl Into<String>, position: Position, stats: RobotStats) -> Self {
        Self {
            name: name.into(),
            position,
            hp: stats.initial_hp,
            sp: stats.initial_sp,
            defense_mode: false,
            stats,
        }
    }

    /// Robot name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current health.
    #[must_use]
    pub const fn hp(&self) -> f64 {
        self.hp
    }

    /// Current stamina.
    #[must_use]
    pub const fn sp(&self) -> u64 {
        self.sp
    }

    /// Whether defense mode is active.
    #[must_use]
    pub const fn defense_mode(&self) -> bool {
        self.defense_mode
    }

    /// The constants this robot plays with.
    #[must_use]
    pub const fn stats(&self) -> &RobotStats {
        &self.stats
    }

    /// A robot is alive while its health is strictly positive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Snapshot of the public state.
    #[must_use]
    pub fn state(&self) -> RobotState {
        RobotState {
            name: self.name.clone(),
            position: self.position,
            hp: self.hp,
            sp: self.sp,
            defense_mode: self.defense_mode,
        }
    }

    /// Called once at the start of this robot's own turn, before its policy runs.
    pub fn start_turn(&mut self) {
        if self.defense_mode {
            debug!(robot = %self.name, "defense mode ends");
            self.defense_mode = false;
        }
    }

    /// Apply incoming damage and return the amount actually subtracted.
    ///
    /// Defense mode scales the damage first; the result is floored at zero.
    /// Health itself is not floored.
    pub fn take_damage(&mut self, damage: f64) -> f64 {
        let scaled = if self.defense_mode {
            damage * self.stats.defense_reduction
        } else {
            damage
        };
        let applied = scaled.max(0.0);
        self.hp -= applied;
        if !self.is_alive() {
            info!(robot = %self.name, hp = self.hp, "robot destroyed");
        }
        applied
    }

    /// Move one cell in `direction`.
    ///
    /// The destination is clamped to the `width × height` grid. The move is
    /// rejected when stamina is short or the destination is taken, either by
    /// `occupied` (the other robot's cell) or by this robot itself after
    /// clamping at an edge.
    pub fn move_in(
        &mut self,
        direction: Direction,
        occupied: Position,
        width: u16,
        height: u16,
    ) -> Outcome {
        if self.sp < self.stats.move_cost {
            return Outcome::rejected(format!(
                "{} does not have enough SP to move!",
                self.name
            ));
        }

        let destination = self.position.step(direction, width, height);
        if destination == self.position || destination == occupied {
            return Outcome::rejected(format!(
                "{} tried to move to {destination}, but the path is blocked.",
                self.name
            ));
        }

        self.position = destination;
        self.sp -= self.stats.move_cost;
        Outcome::applied(format!(
            "{} moved {direction} to {}, HP: {}, SP: {}",
            self.name, self.position, self.hp, self.sp
        ))
    }

    /// Melee attack on an adjacent robot.
    pub fn attack(&mut self, target: &mut Robot) -> Outcome {
        if self.sp < self.stats.attack_cost {
            return Outcome::rejected(format!(
                "{} does not have enough SP to attack!",
                self.name
            ));
        }
        if self.position.manhattan_distance(target.position) != MELEE_RANGE {
            return Outcome::rejected(format!(
                "{} tried to attack a non-adjacent location.",
                self.name
            ));
        }

        let damage = target.take_damage(self.stats.attack_power);
        self.sp -= self.stats.attack_cost;
        Outcome::applied(format!(
            "{} attacks {} at {} for {damage} damage.",
            self.name, target.name, target.position
        ))
    }

    /// Ranged attack on a robot exactly two cells away.
    pub fn ranged_attack(&mut self, target: &mut Robot) -> Outcome {
        let distance = self.position.manhattan_distance(target.position);
        if distance != RANGED_RANGE {
            return Outcome::rejected(format!(
                "{} cannot perform a ranged attack on {} due to incorrect distance (distance: {distance}).",
                self.name, target.name
            ));
        }
        if self.sp < self.stats.ranged_attack_cost {
            return Outcome::rejected(format!(
                "{} does not have enough SP to perform a ranged attack!",
                self.name
            ));
        }

        self.sp -= self.stats.ranged_attack_cost;
        let damage = target.take_damage(self.stats.ranged_attack_power);
        Outcome::applied(format!(
            "{} performs a ranged attack on {} for {damage} damage!",
            self.name, target.name
        ))
    }

    /// Enter defense mode until this robot's next turn starts.
    pub fn defend(&mut self) -> Outcome {
        if self.sp < self.stats.defense_cost {
            return Outcome::rejected(format!(
                "{} does not have enough SP to defend!",
                self.name
            ));
        }

        self.sp -= self.stats.defense_cost;
        self.defense_mode = true;
        Outcome::applied(format!(
            "{} is now in defense mode, reducing incoming damage.",
            self.name
        ))
    }

    /// Recover stamina. Always legal and uncapped.
    pub fn rest(&mut self) -> Outcome {
        self.sp += self.stats.rest_recovery;
        Outcome::applied(format!(
            "{} rests and recovers {} SP. Total SP: {}",
            self.name, self.stats.rest_recovery, self.sp
        ))
    }
}
