//! Deterministic roadmap templates.
//!
//! The conversational generation pipeline hands fully-formed content to
//! the model layer through the same constructors everyone else uses;
//! these templates cover the non-conversational path: a starter skeleton
//! for a topic at a chosen level, ready to be filled in.

use chrono::{Duration, Utc};

use crate::models::{Keyframe, LearningLevel, Roadmap, RoadmapLevel, Stage};

/// Days between consecutive starter keyframes' due dates.
const DUE_STEP_DAYS: i64 = 7;

/// Days until the first starter keyframe falls due.
const FIRST_DUE_DAYS: i64 = 3;

/// Build a single-stage starter roadmap for `topic` at `level`.
pub fn basic_roadmap(topic: &str, level: LearningLevel) -> Roadmap {
    let mut stage = Stage::new("Introduction", level);
    stage.add_keyframe(starter_keyframe(topic, level, 0));

    let mut roadmap = Roadmap::new(topic).with_level(level.into());
    roadmap.add_stage(stage);
    roadmap
}

/// Build a starter roadmap for `topic` at `level`.
///
/// A `Full` roadmap gets one stage per learning level, beginner through
/// refresher; any single level gets the one-stage skeleton from
/// [`basic_roadmap`].
pub fn new_roadmap(topic: &str, level: RoadmapLevel) -> Roadmap {
    let Some(single) = level.as_learning_level() else {
        let mut roadmap = Roadmap::new(topic).with_level(RoadmapLevel::Full);
        for (i, stage_level) in LearningLevel::ALL.into_iter().enumerate() {
            let mut stage = Stage::new(stage_name(stage_level), stage_level);
            stage.add_keyframe(starter_keyframe(topic, stage_level, i as i64));
            roadmap.add_stage(stage);
        }
        return roadmap;
    };
    basic_roadmap(topic, single)
}

fn stage_name(level: LearningLevel) -> &'static str {
    match level {
        LearningLevel::Beginner => "Foundations",
        LearningLevel::Intermediate => "Core practice",
        LearningLevel::Advanced => "Advanced study",
        LearningLevel::Refresher => "Review",
    }
}

fn starter_keyframe(topic: &str, level: LearningLevel, step: i64) -> Keyframe {
    let (title, description) = match level {
        LearningLevel::Beginner => (
            format!("What is {topic}"),
            format!("Understand the basics of {topic}"),
        ),
        LearningLevel::Intermediate => (
            format!("Core techniques in {topic}"),
            format!("Work through the standard methods of {topic}"),
        ),
        LearningLevel::Advanced => (
            format!("Advanced topics in {topic}"),
            format!("Study the deeper results of {topic}"),
        ),
        LearningLevel::Refresher => (
            format!("Review {topic}"),
            format!("Revisit and consolidate what you know about {topic}"),
        ),
    };

    Keyframe::new(title, description)
        .with_due_date(Utc::now() + Duration::days(FIRST_DUE_DAYS + step * DUE_STEP_DAYS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_roadmap_has_one_introduction_stage() {
        let roadmap = basic_roadmap("Graph Theory", LearningLevel::Beginner);

        assert_eq!(roadmap.topic, "Graph Theory");
        assert_eq!(roadmap.level, Some(RoadmapLevel::Beginner));
        assert_eq!(roadmap.stages.len(), 1);
        assert_eq!(roadmap.stages[0].name, "Introduction");
        assert_eq!(roadmap.stages[0].keyframes.len(), 1);
        assert_eq!(roadmap.stages[0].keyframes[0].title, "What is Graph Theory");
        assert!(roadmap.stages[0].keyframes[0].due_date.is_some());
    }

    #[test]
    fn test_full_roadmap_spans_all_levels_in_order() {
        let roadmap = new_roadmap("Rust", RoadmapLevel::Full);

        assert_eq!(roadmap.level, Some(RoadmapLevel::Full));
        let levels: Vec<_> = roadmap.stages.iter().map(|s| s.level).collect();
        assert_eq!(levels, LearningLevel::ALL.to_vec());
    }

    #[test]
    fn test_full_roadmap_staggers_due_dates() {
        let roadmap = new_roadmap("Rust", RoadmapLevel::Full);

        let due_dates: Vec<_> = roadmap
            .stages
            .iter()
            .map(|s| s.keyframes[0].due_date.expect("starter keyframe is dated"))
            .collect();
        assert!(due_dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_level_roadmap_delegates_to_basic() {
        let roadmap = new_roadmap("Rust", RoadmapLevel::Advanced);

        assert_eq!(roadmap.level, Some(RoadmapLevel::Advanced));
        assert_eq!(roadmap.stages.len(), 1);
        assert_eq!(roadmap.stages[0].level, LearningLevel::Advanced);
    }

    #[test]
    fn test_generated_roadmaps_start_incomplete() {
        let roadmap = new_roadmap("Rust", RoadmapLevel::Full);

        assert!(!roadmap.completed);
        assert_eq!(roadmap.total_progress(), 0.0);
    }
}
