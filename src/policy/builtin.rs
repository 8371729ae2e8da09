//! Built-in policies, selectable by name.

use crate::game::{Action, Direction, RobotState, MELEE_RANGE, RANGED_RANGE};
use crate::policy::{GameInfo, Memo, Policy};

/// Names and one-line descriptions of the built-in policies.
pub const BUILTIN_POLICIES: [(&str, &str); 5] = [
    ("chaser", "rests below 20 SP, otherwise closes in and attacks"),
    ("rester", "always rests"),
    ("turret", "never moves; melee at distance 1, ranged at distance 2"),
    ("defender", "always defends"),
    ("script", "cycles rest, up, attack, defend, down"),
];

/// Look up a built-in policy by name.
#[must_use]
pub fn builtin(name: &str) -> Option<Box<dyn Policy + Send + Sync>> {
    match name {
        "chaser" => Some(Box::new(Chaser)),
        "rester" => Some(Box::new(Rester)),
        "turret" => Some(Box::new(Turret)),
        "defender" => Some(Box::new(Defender)),
        "script" => Some(Box::new(Scripted::new([
            Action::Rest,
            Action::Move(Direction::Up),
            Action::Attack,
            Action::Defend,
            Action::Move(Direction::Down),
        ]))),
        _ => None,
    }
}

/// Walks towards the enemy and attacks once adjacent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chaser;

impl Policy for Chaser {
    fn decide(&self, me: &RobotState, info: &GameInfo, _memo: &mut Memo) -> String {
        let enemy = info.enemy_position;
        let action = if me.sp < 20 {
            Action::Rest
        } else if me.position.manhattan_distance(enemy) == MELEE_RANGE {
            Action::Attack
        } else if me.position.x < enemy.x {
            Action::Move(Direction::Right)
        } else if me.position.x > enemy.x {
            Action::Move(Direction::Left)
        } else if me.position.y < enemy.y {
            Action::Move(Direction::Down)
        } else {
            Action::Move(Direction::Up)
        };
        action.as_str().to_string()
    }
}

/// Always rests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rester;

impl Policy for Rester {
    fn decide(&self, _me: &RobotState, _info: &GameInfo, _memo: &mut Memo) -> String {
        Action::Rest.as_str().to_string()
    }
}

/// Always defends.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defender;

impl Policy for Defender {
    fn decide(&self, _me: &RobotState, _info: &GameInfo, _memo: &mut Memo) -> String {
        Action::Defend.as_str().to_string()
    }
}

/// Holds its ground and fires at whatever comes into range.
#[derive(Debug, Clone, Copy, Default)]
pub struct Turret;

impl Policy for Turret {
    fn decide(&self, me: &RobotState, info: &GameInfo, _memo: &mut Memo) -> String {
        let distance = me.position.manhattan_distance(info.enemy_position);
        let action = if me.sp < 30 {
            Action::Rest
        } else if distance == MELEE_RANGE && me.sp >= 10 {
            Action::Attack
        } else if distance == RANGED_RANGE && me.sp >= 15 {
            Action::RangedAttack
        } else {
            Action::Rest
        };
        action.as_str().to_string()
    }
}

/// Plays a fixed sequence of tokens, wrapping around at the end.
///
/// The position in the sequence lives in the memo under `"cursor"`.
/// Tokens are not validated, so a script can also exercise the engine's
/// handling of unknown tokens.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    tokens: Vec<String>,
}

impl Scripted {
    /// Script made of vocabulary actions.
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            tokens: actions.into_iter().map(|a| a.as_str().to_string()).collect(),
        }
    }

    /// Script made of raw tokens.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl Policy for Scripted {
    fn decide(&self, _me: &RobotState, _info: &GameInfo, memo: &mut Memo) -> String {
        if self.tokens.is_empty() {
            return Action::Rest.as_str().to_string();
        }
        let cursor = memo.get_u64("cursor").unwrap_or(0);
        #[allow(clippy::cast_possible_truncation)]
        let index = (cursor % self.tokens.len() as u64) as usize;
        memo.insert("cursor", cursor + 1);
        self.tokens[index].clone()
    }
}
