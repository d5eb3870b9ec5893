use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RoadmapLevel, Stage};

fn default_user_id() -> String {
    "default_user".to_string()
}

/// The root aggregate: a full learning plan for one topic.
///
/// A roadmap owns an ordered sequence of stages and is the unit of
/// persistence. Overall progress is the unweighted mean of per-stage
/// percentages: each stage counts equally no matter how many keyframes it
/// holds, while within a stage progress is keyframe-weighted. Existing
/// persisted plans rely on that asymmetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub topic: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub level: Option<RoadmapLevel>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "completed_date")]
    pub completed_at: Option<DateTime<Utc>>,
    pub stages: Vec<Stage>,
}

impl Roadmap {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            created_at: Utc::now(),
            user_id: default_user_id(),
            level: None,
            completed: false,
            completed_at: None,
            stages: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: RoadmapLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Append a stage. Order is the learning sequence.
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Unweighted mean of per-stage progress percentages, in [0, 100].
    ///
    /// Aggregates over this roadmap's stages only; each stage's own
    /// percentage already accounts for its keyframes. A roadmap with no
    /// stages reports 0.0.
    pub fn total_progress(&self) -> f64 {
        if self.stages.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.stages.iter().map(Stage::progress_percent).sum();
        sum / self.stages.len() as f64
    }

    /// Latch this roadmap as completed.
    ///
    /// Independent of [`Roadmap::total_progress`]; a roadmap can be marked
    /// complete before every keyframe is done, and derived progress never
    /// flips this flag on its own. Calling again is a no-op.
    pub fn mark_complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_at = Some(Utc::now());
    }
}
