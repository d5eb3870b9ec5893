//! MCP tool layer tests.
//!
//! Tests are organized into two sections:
//! - Authoring tools: assembling a roadmap from generated content
//! - Tracking tools: progress reporting and completion

use tempfile::TempDir;
use trailmap::mcp::McpServer;
use trailmap::models::{LearningLevel, Resource, RoadmapLevel};
use trailmap::store::RoadmapStore;

/// Helper to create a test MCP server over a temp-dir store.
fn setup() -> (McpServer, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let store = RoadmapStore::open(dir.path()).expect("open store");
    (McpServer::new(store), dir)
}

/// Helper to author a two-stage roadmap through the tool layer.
fn author_sample(server: &McpServer) {
    server
        .test_create_roadmap("Graph Theory", Some(RoadmapLevel::Full))
        .expect("create roadmap");
    server
        .test_add_stage("Graph Theory", "Basics", LearningLevel::Beginner)
        .expect("add stage");
    server
        .test_add_stage("Graph Theory", "Algorithms", LearningLevel::Intermediate)
        .expect("add stage");
    server
        .test_add_keyframe("Graph Theory", 0, "What is a graph", "intro", None)
        .expect("add keyframe");
    server
        .test_add_keyframe("Graph Theory", 0, "Adjacency lists", "intro", None)
        .expect("add keyframe");
    server
        .test_add_keyframe("Graph Theory", 1, "BFS", "traversal", None)
        .expect("add keyframe");
}

// ============================================================
// Authoring Tools Tests
// ============================================================

mod authoring {
    use super::*;

    #[test]
    fn creates_an_empty_roadmap() {
        let (server, _dir) = setup();

        let info = server
            .test_create_roadmap("Graph Theory", Some(RoadmapLevel::Beginner))
            .expect("create roadmap");

        assert_eq!(info.topic, "Graph Theory");
        assert_eq!(info.level.as_deref(), Some("beginner"));
        assert_eq!(info.stages, 0);
        assert_eq!(info.progress, 0.0);
        assert!(!info.completed);
    }

    #[test]
    fn rejects_a_duplicate_topic() {
        let (server, _dir) = setup();
        server
            .test_create_roadmap("Graph Theory", None)
            .expect("create roadmap");

        let err = server
            .test_create_roadmap("Graph Theory", None)
            .expect_err("duplicate should fail");
        assert!(err.message.contains("already exists"));
    }

    #[test]
    fn appends_stages_in_call_order() {
        let (server, _dir) = setup();
        author_sample(&server);

        let report = server.test_get_progress("Graph Theory").expect("progress");
        let names: Vec<_> = report.stages.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Basics", "Algorithms"]);
        assert_eq!(report.stages[0].level, "beginner");
        assert_eq!(report.stages[1].level, "intermediate");
    }

    #[test]
    fn add_keyframe_rejects_a_bad_stage_index() {
        let (server, _dir) = setup();
        server
            .test_create_roadmap("Graph Theory", None)
            .expect("create roadmap");

        let err = server
            .test_add_keyframe("Graph Theory", 3, "orphan", "no stage", None)
            .expect_err("out of range should fail");
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn add_keyframe_reports_the_stage_counts() {
        let (server, _dir) = setup();
        author_sample(&server);

        let info = server
            .test_add_keyframe("Graph Theory", 1, "DFS", "traversal", None)
            .expect("add keyframe");

        assert_eq!(info.stage, 1);
        assert_eq!(info.total_keyframes, 2);
        assert_eq!(info.completed_keyframes, 0);
    }

    #[test]
    fn attaches_resources_to_a_keyframe() {
        let (server, _dir) = setup();
        author_sample(&server);

        let count = server
            .test_add_resource(
                "Graph Theory",
                0,
                0,
                Resource::new("CLRS ch. 22", "https://example.com/clrs"),
            )
            .expect("add resource");
        assert_eq!(count, 1);

        let count = server
            .test_add_resource(
                "Graph Theory",
                0,
                0,
                Resource::new("Video", "https://example.com/v"),
            )
            .expect("add resource");
        assert_eq!(count, 2);
    }

    #[test]
    fn fails_for_an_unknown_topic() {
        let (server, _dir) = setup();

        let err = server
            .test_add_stage("Nope", "Basics", LearningLevel::Beginner)
            .expect_err("unknown topic should fail");
        assert!(err.message.contains("no roadmap document"));
    }
}

// ============================================================
// Tracking Tools Tests
// ============================================================

mod tracking {
    use super::*;

    #[test]
    fn complete_keyframe_updates_the_report() {
        let (server, _dir) = setup();
        author_sample(&server);

        let report = server
            .test_complete_keyframe("Graph Theory", 0, 0)
            .expect("complete keyframe");

        assert_eq!(report.stages[0].completed_keyframes, 1);
        assert_eq!(report.stages[0].progress_percent, 50.0);
        assert_eq!(report.stages[1].progress_percent, 0.0);
        assert_eq!(report.total_progress, 25.0);
    }

    #[test]
    fn progress_is_the_unweighted_stage_mean() {
        let (server, _dir) = setup();
        author_sample(&server);

        // Basics has two keyframes, Algorithms one. Completing everything
        // in Algorithms moves the total by as much as half of Basics.
        server
            .test_complete_keyframe("Graph Theory", 1, 0)
            .expect("complete keyframe");

        let report = server.test_get_progress("Graph Theory").expect("progress");
        assert_eq!(report.stages[1].progress_percent, 100.0);
        assert_eq!(report.total_progress, 50.0);
    }

    #[test]
    fn completion_survives_a_reload() {
        let (server, dir) = setup();
        author_sample(&server);
        server
            .test_complete_keyframe("Graph Theory", 0, 1)
            .expect("complete keyframe");

        // A fresh server over the same directory sees the persisted state.
        let store = RoadmapStore::open(dir.path()).expect("reopen store");
        let reopened = McpServer::new(store);
        let report = reopened
            .test_get_progress("Graph Theory")
            .expect("progress");
        assert_eq!(report.stages[0].completed_keyframes, 1);
    }

    #[test]
    fn complete_stage_sets_the_flag_only() {
        let (server, _dir) = setup();
        author_sample(&server);

        let info = server
            .test_complete_stage("Graph Theory", 0)
            .expect("complete stage");

        assert!(info.completed);
        assert_eq!(info.completed_keyframes, 0);
        assert_eq!(info.progress_percent, 0.0);
    }

    #[test]
    fn complete_roadmap_sets_the_flag_only() {
        let (server, _dir) = setup();
        author_sample(&server);

        let info = server
            .test_complete_roadmap("Graph Theory")
            .expect("complete roadmap");

        assert!(info.completed);
        assert_eq!(info.progress, 0.0);
    }

    #[test]
    fn renders_the_tree_with_markers() {
        let (server, _dir) = setup();
        author_sample(&server);
        server
            .test_complete_keyframe("Graph Theory", 0, 0)
            .expect("complete keyframe");

        let tree = server
            .test_render_roadmap("Graph Theory")
            .expect("render");

        assert!(tree.starts_with("Graph Theory (25% complete)"));
        assert!(tree.contains("● What is a graph"));
        assert!(tree.contains("○ Adjacency lists"));
    }

    #[test]
    fn lists_roadmaps_sorted_by_topic() {
        let (server, _dir) = setup();
        author_sample(&server);
        server
            .test_create_roadmap("Algebra", None)
            .expect("create roadmap");

        let list = server.test_list_roadmaps().expect("list");
        let topics: Vec<_> = list.roadmaps.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(topics, vec!["Algebra", "Graph Theory"]);
        assert_eq!(list.roadmaps[1].stages, 2);
        assert_eq!(list.roadmaps[1].level.as_deref(), Some("full"));
    }
}
