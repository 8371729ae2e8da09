//! The action vocabulary and its dispatch onto robot primitives.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::game::{Direction, Outcome, Robot};

/// An action a policy may choose for its robot's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Recover stamina.
    Rest,
    /// Melee attack on the adjacent enemy.
    Attack,
    /// Enter defense mode.
    Defend,
    /// Move one cell.
    Move(Direction),
    /// Attack the enemy at distance two.
    RangedAttack,
}

impl Action {
    /// Every action in the vocabulary.
    pub const ALL: [Action; 8] = [
        Action::Rest,
        Action::Attack,
        Action::Defend,
        Action::Move(Direction::Up),
        Action::Move(Direction::Down),
        Action::Move(Direction::Left),
        Action::Move(Direction::Right),
        Action::RangedAttack,
    ];

    /// The token naming this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Rest => "rest",
            Action::Attack => "attack",
            Action::Defend => "defend",
            Action::Move(direction) => direction.as_str(),
            Action::RangedAttack => "ranged_attack",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token outside the action vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action token {0:?}")]
pub struct UnknownActionToken(pub String);

impl FromStr for Action {
    type Err = UnknownActionToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rest" => Ok(Action::Rest),
            "attack" => Ok(Action::Attack),
            "defend" => Ok(Action::Defend),
            "ranged_attack" => Ok(Action::RangedAttack),
            other => other
                .parse::<Direction>()
                .map(Action::Move)
                .map_err(|()| UnknownActionToken(other.to_string())),
        }
    }
}

/// Apply `action` for `actor` against `enemy` on a `width × height` grid.
///
/// Illegal attempts are reported through [`Outcome::applied`] and never
/// change state.
pub fn resolve(
    action: Action,
    actor: &mut Robot,
    enemy: &mut Robot,
    width: u16,
    height: u16,
) -> Outcome {
    match action {
        Action::Rest => actor.rest(),
        Action::Attack => actor.attack(enemy),
        Action::Defend => actor.defend(),
        Action::Move(direction) => actor.move_in(direction, enemy.position(), width, height),
        Action::RangedAttack => actor.ranged_attack(enemy),
    }
}
