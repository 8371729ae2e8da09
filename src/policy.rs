//! Decision interface for robots.
//!
//! A policy receives its own robot's public state, what it can see of the
//! enemy, and a private memo that survives between its turns. It answers with
//! one action token. The engine never looks inside a policy; tokens outside
//! the vocabulary abort the battle.

mod builtin;

pub use builtin::{builtin, Chaser, Defender, Rester, Scripted, Turret, BUILTIN_POLICIES};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::game::{Position, RobotState};

/// What a policy knows about the battle besides its own robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    /// Cell currently occupied by the enemy.
    pub enemy_position: Position,
    /// Current zero-based turn index.
    pub turn: u32,
    /// Grid width.
    pub x_max: u16,
    /// Grid height.
    pub y_max: u16,
}

/// Per-policy scratch storage, scoped to one robot in one battle.
///
/// Starts empty on the robot's first turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Memo {
    entries: Map<String, Value>,
}

impl Memo {
    /// Create an empty memo.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the policy stores something.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a stored value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a stored unsigned integer.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.entries.get(key).and_then(Value::as_u64)
    }

    /// Store a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a stored value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }
}

/// A robot's decision function.
pub trait Policy {
    /// Choose the action token for this turn.
    fn decide(&self, me: &RobotState, info: &GameInfo, memo: &mut Memo) -> String;
}

impl<F> Policy for F
where
    F: Fn(&RobotState, &GameInfo, &mut Memo) -> String,
{
    fn decide(&self, me: &RobotState, info: &GameInfo, memo: &mut Memo) -> String {
        self(me, info, memo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me() -> RobotState {
        RobotState {
            name: "A".to_string(),
            position: Position::new(1, 3),
            hp: 100.0,
            sp: 50,
            defense_mode: false,
        }
    }

    fn info() -> GameInfo {
        GameInfo {
            enemy_position: Position::new(7, 3),
            turn: 0,
            x_max: 9,
            y_max: 7,
        }
    }

    #[test]
    fn test_memo_starts_empty() {
        let memo = Memo::new();
        assert!(memo.is_empty());
        assert_eq!(memo.len(), 0);
        assert!(memo.get("anything").is_none());
    }

    #[test]
    fn test_memo_insert_and_remove() {
        let mut memo = Memo::new();
        assert!(memo.insert("count", 3u64).is_none());
        assert_eq!(memo.get_u64("count"), Some(3));
        assert_eq!(memo.insert("count", 4u64), Some(Value::from(3u64)));
        memo.insert("label", "hello");
        assert_eq!(memo.len(), 2);
        assert_eq!(memo.remove("label"), Some(Value::from("hello")));
        assert_eq!(memo.get_u64("label"), None);
    }

    #[test]
    fn test_closure_is_policy() {
        let policy = |_: &RobotState, _: &GameInfo, memo: &mut Memo| {
            if memo.is_empty() {
                memo.insert("seen", true);
                "defend".to_string()
            } else {
                "attack".to_string()
            }
        };
        let mut memo = Memo::new();
        assert_eq!(policy.decide(&me(), &info(), &mut memo), "defend");
        assert_eq!(policy.decide(&me(), &info(), &mut memo), "attack");
    }
}
