//! Request and response types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================
// Request Types
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateRoadmapRequest {
    #[schemars(description = "Topic the roadmap covers, e.g. 'Graph Theory'")]
    pub topic: String,
    #[schemars(
        description = "Overall level: 'beginner', 'intermediate', 'advanced', 'refresher', or 'full' (spans all levels). Omit for no level tag."
    )]
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddStageRequest {
    #[schemars(description = "Topic of the roadmap to extend")]
    pub topic: String,
    #[schemars(description = "Name of the new stage, e.g. 'Basics'")]
    pub name: String,
    #[schemars(
        description = "Learning level of the stage: 'beginner', 'intermediate', 'advanced', or 'refresher'"
    )]
    pub level: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddKeyframeRequest {
    #[schemars(description = "Topic of the roadmap to extend")]
    pub topic: String,
    #[schemars(description = "Zero-based index of the stage, in roadmap order")]
    pub stage: usize,
    #[schemars(description = "Short title of the checklist item")]
    pub title: String,
    #[schemars(description = "What completing this item involves")]
    pub description: String,
    #[schemars(
        description = "Optional advisory due date, RFC 3339 (e.g. '2026-09-01T00:00:00Z')"
    )]
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddResourceRequest {
    #[schemars(description = "Topic of the roadmap to extend")]
    pub topic: String,
    #[schemars(description = "Zero-based index of the stage, in roadmap order")]
    pub stage: usize,
    #[schemars(description = "Zero-based index of the keyframe within the stage")]
    pub keyframe: usize,
    #[schemars(description = "Title of the external reference")]
    pub title: String,
    #[schemars(description = "URL of the external reference")]
    pub url: String,
    #[schemars(description = "Optional note on why this resource helps")]
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteKeyframeRequest {
    #[schemars(description = "Topic of the roadmap")]
    pub topic: String,
    #[schemars(description = "Zero-based index of the stage, in roadmap order")]
    pub stage: usize,
    #[schemars(description = "Zero-based index of the keyframe within the stage")]
    pub keyframe: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteStageRequest {
    #[schemars(description = "Topic of the roadmap")]
    pub topic: String,
    #[schemars(description = "Zero-based index of the stage, in roadmap order")]
    pub stage: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteRoadmapRequest {
    #[schemars(description = "Topic of the roadmap to mark complete")]
    pub topic: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetProgressRequest {
    #[schemars(description = "Topic of the roadmap to report on")]
    pub topic: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenderRoadmapRequest {
    #[schemars(description = "Topic of the roadmap to render")]
    pub topic: String,
}

// ============================================================
// Response Types
// ============================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RoadmapInfo {
    pub topic: String,
    pub level: Option<String>,
    pub user_id: String,
    pub created_at: String,
    pub completed: bool,
    pub stages: usize,
    pub progress: f64,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StageProgressInfo {
    pub stage: usize,
    pub name: String,
    pub level: String,
    pub completed_keyframes: usize,
    pub total_keyframes: usize,
    pub progress_percent: f64,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProgressReport {
    pub topic: String,
    /// Unweighted mean of the per-stage percentages.
    pub total_progress: f64,
    pub completed: bool,
    pub stages: Vec<StageProgressInfo>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RoadmapListEntry {
    pub topic: String,
    pub level: Option<String>,
    pub stages: usize,
    pub progress: f64,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RoadmapListResponse {
    pub roadmaps: Vec<RoadmapListEntry>,
}
