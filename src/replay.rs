//! Battle replay log.
//!
//! The log is an ordered sequence: a settings header followed by one entry
//! per executed turn, each holding both robots' state after the turn and the
//! action that was played. The last entry is the final state of the battle.
//!
//! Serialized form:
//!
//! ```json
//! [
//!     { "settings": { "max_turn": 100, "x_max": 9, "y_max": 7 } },
//!     { "turn": 0,
//!       "robots": [ { "name": "Robot A", "position": [1, 3], "hp": 100.0, "sp": 65, "defense_mode": false },
//!                   { "name": "Robot B", "position": [7, 3], "hp": 100.0, "sp": 50, "defense_mode": false } ],
//!       "action": { "robot_name": "Robot A", "action": "rest" } }
//! ]
//! ```

mod text;
mod viewer;

pub use text::{render_summary, render_turn};
pub use viewer::ReplayViewer;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::battle::{BattleConfig, Side};
use crate::game::{Position, RobotState};

/// The action executed on a turn.
///
/// Both fields are optional so that logs with a leading placeholder entry
/// can still be read; the engine always fills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Name of the robot that acted.
    pub robot_name: Option<String>,
    /// The action token it played.
    pub action: Option<String>,
}

impl ActionRecord {
    /// Record of `robot` playing `action`.
    #[must_use]
    pub fn new(robot: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            robot_name: Some(robot.into()),
            action: Some(action.into()),
        }
    }
}

/// State after one executed turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Zero-based turn index.
    pub turn: u32,
    /// Both robots, first robot first.
    pub robots: [RobotState; 2],
    /// What was played.
    pub action: ActionRecord,
}

/// Error type for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// File access failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The log is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The first element is not a settings header.
    #[error("replay log does not start with a settings header")]
    MissingSettings,

    /// A settings header appeared after the first element.
    #[error("unexpected settings header at element {index}")]
    UnexpectedSettings {
        /// Position in the serialized sequence.
        index: usize,
    },

    /// Turn indices are not contiguous from zero.
    #[error("entry {index} has turn {found}, expected {index}")]
    TurnMismatch {
        /// Position among the turn entries.
        index: usize,
        /// Turn index stored in the entry.
        found: u32,
    },

    /// More entries than the turn limit allows.
    #[error("log has {turns} turns but max_turn is {max_turn}")]
    TooManyTurns {
        /// Number of turn entries.
        turns: usize,
        /// Configured limit.
        max_turn: u32,
    },

    /// A robot sits outside the grid.
    #[error("turn {turn}: {robot} at {position} is outside the grid")]
    OutOfBounds {
        /// Turn index.
        turn: u32,
        /// Robot name.
        robot: String,
        /// Recorded position.
        position: Position,
    },

    /// The log has no turns to show.
    #[error("replay log has no turns")]
    NoTurns,

    /// Turn number out of bounds.
    #[error("turn {requested} out of bounds (last: {last})")]
    TurnOutOfBounds {
        /// Requested turn.
        requested: u32,
        /// Last recorded turn.
        last: u32,
    },
}

/// Serialized header element.
#[derive(Serialize, Deserialize)]
struct Header {
    settings: BattleConfig,
}

/// Any element of the serialized sequence.
#[derive(Deserialize)]
#[serde(untagged)]
enum Element {
    Header(Header),
    Turn(TurnRecord),
}

/// The complete record of one battle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayLog {
    settings: BattleConfig,
    turns: Vec<TurnRecord>,
}

impl ReplayLog {
    /// Empty log for a battle with `settings`.
    #[must_use]
    pub fn new(settings: BattleConfig) -> Self {
        Self {
            settings,
            turns: Vec::new(),
        }
    }

    /// Append the entry for the turn just played.
    pub(crate) fn push(&mut self, record: TurnRecord) {
        self.turns.push(record);
    }

    /// Battle settings from the header.
    #[must_use]
    pub const fn settings(&self) -> &BattleConfig {
        &self.settings
    }

    /// Turn entries in order.
    #[must_use]
    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Number of executed turns.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Number of serialized elements, header included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.turns.len() + 1
    }

    /// Entry for `turn`, if it was played.
    #[must_use]
    pub fn state_at(&self, turn: u32) -> Option<&TurnRecord> {
        self.turns.get(turn as usize)
    }

    /// Robot states after the last executed turn.
    #[must_use]
    pub fn final_state(&self) -> Option<&[RobotState; 2]> {
        self.turns.last().map(|record| &record.robots)
    }

    /// Winner implied by the final state, using the scheduler's tie-break.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.final_state()
            .map(|[first, second]| Side::by_health(first.hp, second.hp))
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: non-contiguous turn indices, more
    /// turns than `max_turn`, or a robot outside the grid.
    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.turns.len() > self.settings.max_turn as usize {
            return Err(ReplayError::TooManyTurns {
                turns: self.turns.len(),
                max_turn: self.settings.max_turn,
            });
        }
        for (index, record) in self.turns.iter().enumerate() {
            if record.turn as usize != index {
                return Err(ReplayError::TurnMismatch {
                    index,
                    found: record.turn,
                });
            }
            for robot in &record.robots {
                if !robot.position.in_bounds(self.settings.x_max, self.settings.y_max) {
                    return Err(ReplayError::OutOfBounds {
                        turn: record.turn,
                        robot: robot.name.clone(),
                        position: robot.position,
                    });
                }
            }
        }
        Ok(())
    }

    fn from_elements(elements: Vec<Element>) -> Result<Self, ReplayError> {
        let mut elements = elements.into_iter();
        let Some(Element::Header(header)) = elements.next() else {
            return Err(ReplayError::MissingSettings);
        };

        let mut turns = Vec::with_capacity(elements.len());
        for (offset, element) in elements.enumerate() {
            match element {
                Element::Turn(record) => turns.push(record),
                Element::Header(_) => {
                    return Err(ReplayError::UnexpectedSettings { index: offset + 1 });
                }
            }
        }

        Ok(Self {
            settings: header.settings,
            turns,
        })
    }

    /// Serialize as JSON with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }

    /// Parse a JSON log.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a well-formed log.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    fn write_json<W: Write>(&self, writer: W) -> Result<(), ReplayError> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Save the log to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a log from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if file operations fail or the format is invalid.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Serialize for ReplayLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.element_count()))?;
        seq.serialize_element(&Header {
            settings: self.settings,
        })?;
        for record in &self.turns {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ReplayLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<Element>::deserialize(deserializer)?;
        Self::from_elements(elements).map_err(D::Error::custom)
    }
}
