use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a level string does not name a known level.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized learning level '{0}'")]
pub struct ParseLevelError(pub String);

/// The difficulty tag of a single stage.
///
/// - `Beginner`: first contact with the topic
/// - `Intermediate`: working knowledge, standard techniques
/// - `Advanced`: deeper results and specialization
/// - `Refresher`: revisiting material already learned once
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearningLevel {
    Beginner,
    Intermediate,
    Advanced,
    Refresher,
}

impl LearningLevel {
    /// Every level, in learning order.
    pub const ALL: [LearningLevel; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Refresher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Refresher => "refresher",
        }
    }
}

impl fmt::Display for LearningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LearningLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "refresher" => Ok(Self::Refresher),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// The level of a roadmap as a whole.
///
/// Extends [`LearningLevel`] with `Full`, a roadmap that spans beginner
/// through refresher. `Full` never appears on an individual stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapLevel {
    Beginner,
    Intermediate,
    Advanced,
    Refresher,
    Full,
}

impl RoadmapLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Refresher => "refresher",
            Self::Full => "full",
        }
    }

    /// The single stage level this roadmap level corresponds to, or
    /// `None` for `Full`.
    pub fn as_learning_level(&self) -> Option<LearningLevel> {
        match self {
            Self::Beginner => Some(LearningLevel::Beginner),
            Self::Intermediate => Some(LearningLevel::Intermediate),
            Self::Advanced => Some(LearningLevel::Advanced),
            Self::Refresher => Some(LearningLevel::Refresher),
            Self::Full => None,
        }
    }
}

impl From<LearningLevel> for RoadmapLevel {
    fn from(level: LearningLevel) -> Self {
        match level {
            LearningLevel::Beginner => Self::Beginner,
            LearningLevel::Intermediate => Self::Intermediate,
            LearningLevel::Advanced => Self::Advanced,
            LearningLevel::Refresher => Self::Refresher,
        }
    }
}

impl fmt::Display for RoadmapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadmapLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("full") {
            return Ok(Self::Full);
        }
        LearningLevel::from_str(s).map(Self::from)
    }
}
