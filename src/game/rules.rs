//! Tunable robot constants.
//!
//! Defaults reproduce the reference game balance. Changing them changes
//! battle outcomes, so replays are only comparable between runs that used
//! the same stats.

use serde::{Deserialize, Serialize};

/// Health every robot starts with.
pub const INITIAL_HP: f64 = 100.0;

/// Stamina every robot starts with.
pub const INITIAL_SP: u64 = 50;

/// Per-robot action costs and effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotStats {
    /// Starting health.
    pub initial_hp: f64,
    /// Starting stamina.
    pub initial_sp: u64,
    /// Damage dealt by a melee attack.
    pub attack_power: f64,
    /// Stamina spent on a melee attack.
    pub attack_cost: u64,
    /// Damage dealt by a ranged attack.
    pub ranged_attack_power: f64,
    /// Stamina spent on a ranged attack.
    pub ranged_attack_cost: u64,
    /// Stamina spent on a move.
    pub move_cost: u64,
    /// Stamina recovered by resting.
    pub rest_recovery: u64,
    /// Stamina spent entering defense mode.
    pub defense_cost: u64,
    /// Multiplier applied to incoming damage while in defense mode.
    pub defense_reduction: f64,
}

impl Default for RobotStats {
    fn default() -> Self {
        Self {
            initial_hp: INITIAL_HP,
            initial_sp: INITIAL_SP,
            attack_power: 20.0,
            attack_cost: 10,
            ranged_attack_power: 15.0,
            ranged_attack_cost: 15,
            move_cost: 5,
            rest_recovery: 15,
            defense_cost: 10,
            defense_reduction: 0.5,
        }
    }
}

/// Melee reach.
pub const MELEE_RANGE: u32 = 1;

/// Ranged attacks only land at exactly this distance.
pub const RANGED_RANGE: u32 = 2;
