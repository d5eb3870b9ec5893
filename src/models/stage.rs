use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Keyframe, LearningLevel};

/// A named phase of a roadmap at a single learning level.
///
/// A stage has two separate notions of being done. `progress_percent` is
/// derived from its keyframes at call time and is never stored; the
/// `completed` flag is an explicit caller action and is never set
/// automatically, even at 100% derived progress. The two can disagree in
/// either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub level: LearningLevel,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "completed_date")]
    pub completed_at: Option<DateTime<Utc>>,
    pub keyframes: Vec<Keyframe>,
}

impl Stage {
    pub fn new(name: impl Into<String>, level: LearningLevel) -> Self {
        Self {
            name: name.into(),
            level,
            completed: false,
            completed_at: None,
            keyframes: Vec::new(),
        }
    }

    /// Append a keyframe. Order is the learning sequence.
    pub fn add_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.push(keyframe);
    }

    pub fn total_keyframes(&self) -> usize {
        self.keyframes.len()
    }

    /// Count of completed keyframes. Direct children only.
    pub fn completed_keyframes(&self) -> usize {
        self.keyframes.iter().filter(|k| k.completed).count()
    }

    /// Share of completed keyframes in [0, 100], recomputed on every call.
    ///
    /// A stage with no keyframes reports 0.0.
    pub fn progress_percent(&self) -> f64 {
        if self.keyframes.is_empty() {
            return 0.0;
        }
        100.0 * self.completed_keyframes() as f64 / self.keyframes.len() as f64
    }

    /// Latch this stage as completed.
    ///
    /// Independent of [`Stage::progress_percent`]; marking a stage does
    /// not touch its keyframes. Calling again is a no-op.
    pub fn mark_complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_at = Some(Utc::now());
    }
}
