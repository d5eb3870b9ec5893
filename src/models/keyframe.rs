use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// An atomic checklist item within a stage.
///
/// Keyframes are the unit of progress: a stage's completion percentage is
/// the share of its keyframes marked complete. The due date is advisory
/// only and never enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    /// Set by [`Keyframe::mark_complete`]; `Some` exactly when `completed`.
    #[serde(default, rename = "completed_date")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Keyframe {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            due_date: None,
            completed: false,
            completed_at: None,
            resources: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Latch this keyframe as completed.
    ///
    /// One-way: there is no un-complete operation. Calling again is a
    /// no-op, so `completed_at` keeps the first completion time.
    pub fn mark_complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_at = Some(Utc::now());
    }

    /// Append a resource. No dedup; order is preserved.
    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }
}
