//! MCP server exposing roadmap authoring and progress tools to agents.
//!
//! The generation pipeline assembles a roadmap through these tools from
//! conversational content; every mutation goes through the model layer's
//! public API and is persisted back to the store before the tool returns.

mod types;

pub use types::*;

use chrono::{DateTime, Utc};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::Serialize;

use crate::models::{
    Keyframe, LearningLevel, ParseLevelError, Resource, Roadmap, RoadmapLevel, Stage,
};
use crate::render;
use crate::store::{RoadmapStore, StoreError};

#[derive(Clone)]
pub struct McpServer {
    store: RoadmapStore,
    tool_router: ToolRouter<Self>,
}

fn store_error(e: StoreError) -> McpError {
    match e {
        StoreError::NotFound { path } => McpError::invalid_params(
            format!("no roadmap document at {}", path.display()),
            None,
        ),
        other => McpError::internal_error(other.to_string(), None),
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_level<T>(s: &str) -> Result<T, McpError>
where
    T: std::str::FromStr<Err = ParseLevelError>,
{
    s.parse()
        .map_err(|e: ParseLevelError| McpError::invalid_params(e.to_string(), None))
}

fn parse_due_date(s: &str) -> Result<DateTime<Utc>, McpError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| McpError::invalid_params(format!("invalid due_date '{s}': {e}"), None))
}

fn stage_at(roadmap: &mut Roadmap, index: usize) -> Result<&mut Stage, McpError> {
    let count = roadmap.stages.len();
    roadmap.stages.get_mut(index).ok_or_else(|| {
        McpError::invalid_params(
            format!("stage index {index} out of range (roadmap has {count} stages)"),
            None,
        )
    })
}

fn keyframe_at(stage: &mut Stage, index: usize) -> Result<&mut Keyframe, McpError> {
    let count = stage.keyframes.len();
    stage.keyframes.get_mut(index).ok_or_else(|| {
        McpError::invalid_params(
            format!("keyframe index {index} out of range (stage has {count} keyframes)"),
            None,
        )
    })
}

fn roadmap_info(roadmap: &Roadmap) -> RoadmapInfo {
    RoadmapInfo {
        topic: roadmap.topic.clone(),
        level: roadmap.level.map(|l| l.as_str().to_string()),
        user_id: roadmap.user_id.clone(),
        created_at: roadmap.created_at.to_rfc3339(),
        completed: roadmap.completed,
        stages: roadmap.stages.len(),
        progress: roadmap.total_progress(),
    }
}

fn stage_progress(index: usize, stage: &Stage) -> StageProgressInfo {
    StageProgressInfo {
        stage: index,
        name: stage.name.clone(),
        level: stage.level.as_str().to_string(),
        completed_keyframes: stage.completed_keyframes(),
        total_keyframes: stage.total_keyframes(),
        progress_percent: stage.progress_percent(),
        completed: stage.completed,
    }
}

fn progress_report(roadmap: &Roadmap) -> ProgressReport {
    ProgressReport {
        topic: roadmap.topic.clone(),
        total_progress: roadmap.total_progress(),
        completed: roadmap.completed,
        stages: roadmap
            .stages
            .iter()
            .enumerate()
            .map(|(i, s)| stage_progress(i, s))
            .collect(),
    }
}

impl McpServer {
    pub fn new(store: RoadmapStore) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    fn load(&self, topic: &str) -> Result<Roadmap, McpError> {
        self.store.load(topic).map_err(store_error)
    }

    fn persist(&self, roadmap: &Roadmap) -> Result<(), McpError> {
        self.store.save(roadmap).map(|_| ()).map_err(store_error)
    }

    // ============================================================
    // Tool logic - public so integration tests can call it directly
    // ============================================================

    pub fn test_create_roadmap(
        &self,
        topic: &str,
        level: Option<RoadmapLevel>,
    ) -> Result<RoadmapInfo, McpError> {
        if self.store.contains(topic) {
            return Err(McpError::invalid_params(
                format!("a roadmap for '{topic}' already exists"),
                None,
            ));
        }

        let mut roadmap = Roadmap::new(topic);
        roadmap.level = level;
        self.persist(&roadmap)?;
        Ok(roadmap_info(&roadmap))
    }

    pub fn test_add_stage(
        &self,
        topic: &str,
        name: &str,
        level: LearningLevel,
    ) -> Result<RoadmapInfo, McpError> {
        let mut roadmap = self.load(topic)?;
        roadmap.add_stage(Stage::new(name, level));
        self.persist(&roadmap)?;
        Ok(roadmap_info(&roadmap))
    }

    pub fn test_add_keyframe(
        &self,
        topic: &str,
        stage: usize,
        title: &str,
        description: &str,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<StageProgressInfo, McpError> {
        let mut roadmap = self.load(topic)?;
        {
            let stage = stage_at(&mut roadmap, stage)?;
            let mut keyframe = Keyframe::new(title, description);
            if let Some(due) = due_date {
                keyframe = keyframe.with_due_date(due);
            }
            stage.add_keyframe(keyframe);
        }
        self.persist(&roadmap)?;
        Ok(stage_progress(stage, &roadmap.stages[stage]))
    }

    pub fn test_add_resource(
        &self,
        topic: &str,
        stage: usize,
        keyframe: usize,
        resource: Resource,
    ) -> Result<usize, McpError> {
        let mut roadmap = self.load(topic)?;
        let count = {
            let stage = stage_at(&mut roadmap, stage)?;
            let keyframe = keyframe_at(stage, keyframe)?;
            keyframe.add_resource(resource);
            keyframe.resources.len()
        };
        self.persist(&roadmap)?;
        Ok(count)
    }

    pub fn test_complete_keyframe(
        &self,
        topic: &str,
        stage: usize,
        keyframe: usize,
    ) -> Result<ProgressReport, McpError> {
        let mut roadmap = self.load(topic)?;
        {
            let stage = stage_at(&mut roadmap, stage)?;
            keyframe_at(stage, keyframe)?.mark_complete();
        }
        self.persist(&roadmap)?;
        Ok(progress_report(&roadmap))
    }

    pub fn test_complete_stage(
        &self,
        topic: &str,
        stage: usize,
    ) -> Result<StageProgressInfo, McpError> {
        let mut roadmap = self.load(topic)?;
        stage_at(&mut roadmap, stage)?.mark_complete();
        self.persist(&roadmap)?;
        Ok(stage_progress(stage, &roadmap.stages[stage]))
    }

    pub fn test_complete_roadmap(&self, topic: &str) -> Result<RoadmapInfo, McpError> {
        let mut roadmap = self.load(topic)?;
        roadmap.mark_complete();
        self.persist(&roadmap)?;
        Ok(roadmap_info(&roadmap))
    }

    pub fn test_get_progress(&self, topic: &str) -> Result<ProgressReport, McpError> {
        Ok(progress_report(&self.load(topic)?))
    }

    pub fn test_render_roadmap(&self, topic: &str) -> Result<String, McpError> {
        Ok(render::render_tree(&self.load(topic)?))
    }

    pub fn test_list_roadmaps(&self) -> Result<RoadmapListResponse, McpError> {
        let summaries = self.store.list().map_err(store_error)?;
        let roadmaps = summaries
            .into_iter()
            .map(|s| RoadmapListEntry {
                topic: s.topic,
                level: s.level.map(|l| l.as_str().to_string()),
                stages: s.stages,
                progress: s.progress,
                completed: s.completed,
            })
            .collect();
        Ok(RoadmapListResponse { roadmaps })
    }
}

#[tool_router]
impl McpServer {
    #[tool(
        description = "Create a new, empty roadmap for a topic. Call this FIRST, then build it up with add_stage / add_keyframe / add_resource in learning order. Fails if a roadmap for the topic already exists. Level is optional: one of 'beginner', 'intermediate', 'advanced', 'refresher', or 'full'."
    )]
    async fn create_roadmap(
        &self,
        params: Parameters<CreateRoadmapRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let level = match req.level.as_deref() {
            Some(s) => Some(parse_level::<RoadmapLevel>(s)?),
            None => None,
        };
        let info = self.test_create_roadmap(&req.topic, level)?;
        json_result(&info)
    }

    #[tool(
        description = "Append a stage to a roadmap. Stages are ordered: the sequence you add them in is the learning sequence. Each stage carries one learning level ('beginner', 'intermediate', 'advanced', or 'refresher')."
    )]
    async fn add_stage(
        &self,
        params: Parameters<AddStageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let level = parse_level::<LearningLevel>(&req.level)?;
        let info = self.test_add_stage(&req.topic, &req.name, level)?;
        json_result(&info)
    }

    #[tool(
        description = "Append a checklist item (keyframe) to a stage. Keyframes are the unit of progress: stage progress is the share of its keyframes completed. The due date is advisory and never enforced. Returns the stage's updated counts."
    )]
    async fn add_keyframe(
        &self,
        params: Parameters<AddKeyframeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let due_date = match req.due_date.as_deref() {
            Some(s) => Some(parse_due_date(s)?),
            None => None,
        };
        let info =
            self.test_add_keyframe(&req.topic, req.stage, &req.title, &req.description, due_date)?;
        json_result(&info)
    }

    #[tool(
        description = "Attach an external resource (title + url) to a keyframe. Resources are append-only and keep their order; duplicates are not rejected."
    )]
    async fn add_resource(
        &self,
        params: Parameters<AddResourceRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let mut resource = Resource::new(req.title, req.url);
        if let Some(description) = req.description {
            resource = resource.with_description(description);
        }
        let count = self.test_add_resource(&req.topic, req.stage, req.keyframe, resource)?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Resource attached ({count} on this keyframe)"
        ))]))
    }

    #[tool(
        description = "Mark a keyframe as completed. One-way: there is no un-complete. Calling again is a no-op and keeps the original completion time. Returns the full progress report so you can see the updated percentages."
    )]
    async fn complete_keyframe(
        &self,
        params: Parameters<CompleteKeyframeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let report = self.test_complete_keyframe(&req.topic, req.stage, req.keyframe)?;
        json_result(&report)
    }

    #[tool(
        description = "Mark a stage as completed. This sets an explicit flag independent of the stage's derived progress percentage: a stage is never auto-completed at 100%, and marking it complete does not touch its keyframes."
    )]
    async fn complete_stage(
        &self,
        params: Parameters<CompleteStageRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let info = self.test_complete_stage(&req.topic, req.stage)?;
        json_result(&info)
    }

    #[tool(
        description = "Mark a whole roadmap as completed. Same semantics as complete_stage: an explicit flag, independent of derived progress."
    )]
    async fn complete_roadmap(
        &self,
        params: Parameters<CompleteRoadmapRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let info = self.test_complete_roadmap(&req.topic)?;
        json_result(&info)
    }

    #[tool(
        description = "Report progress for a roadmap: per-stage completed/total keyframe counts and percentages, plus the overall percentage (unweighted mean across stages)."
    )]
    async fn get_progress(
        &self,
        params: Parameters<GetProgressRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let report = self.test_get_progress(&req.topic)?;
        json_result(&report)
    }

    #[tool(
        description = "Render a roadmap as an ASCII tree with completion markers. Useful for showing the plan to the user or checking indexes before add_keyframe / complete_keyframe."
    )]
    async fn render_roadmap(
        &self,
        params: Parameters<RenderRoadmapRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let tree = self.test_render_roadmap(&req.topic)?;
        Ok(CallToolResult::success(vec![Content::text(tree)]))
    }

    #[tool(
        description = "List every stored roadmap with its level, stage count, overall progress, and completion flag, sorted by topic."
    )]
    async fn list_roadmaps(&self) -> Result<CallToolResult, McpError> {
        let list = self.test_list_roadmaps()?;
        json_result(&list)
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "trailmap".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            instructions: Some(
                r#"Trailmap stores learning roadmaps: ordered stages of ordered keyframes.

ROADMAP SHAPE:
- Roadmap = one topic, ordered stages. Order is the learning sequence.
- Stage = one phase at a single level: beginner, intermediate, advanced, or refresher.
- Keyframe = one checklist item inside a stage; may carry an advisory due date
  and external resources (title + url).
- Stages and keyframes are addressed by zero-based index in their current order.
  Call render_roadmap or get_progress first if you are unsure of an index.

PROGRESS vs COMPLETION:
- Progress is derived: stage progress is the share of its keyframes completed;
  roadmap progress is the plain mean of the stage percentages (each stage counts
  equally, however many keyframes it has).
- The completed flag on a stage or roadmap is a separate, explicit action.
  Reaching 100% derived progress does not set it; use complete_stage /
  complete_roadmap when the learner decides a phase is done.
- Completion is one-way. There is no un-complete tool.

AUTHORING WORKFLOW (turning generated content into a roadmap):
1. create_roadmap with the topic and overall level
2. add_stage for each phase, in learning order
3. add_keyframe for each checklist item, in order within its stage
4. add_resource for supporting links
5. render_roadmap to show the result

TRACKING WORKFLOW:
- complete_keyframe as the learner finishes items
- get_progress for the numbers, render_roadmap for a picture
- complete_roadmap when the plan as a whole is done

IMPORTANT:
- Keyframe titles should be concrete actions ("Implement Dijkstra on the
  example graph"), not vague goals.
- Due dates are advisory; never refuse work because one is past."#
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve MCP over stdio. Logs must go to stderr in this mode.
pub async fn run_stdio_server(store: RoadmapStore) -> anyhow::Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!("Starting MCP server via stdio");

    let service = McpServer::new(store);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!("MCP server stopped: {:?}", quit_reason);

    Ok(())
}
