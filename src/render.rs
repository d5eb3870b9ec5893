//! ASCII tree rendering for roadmaps.

use crate::models::{Keyframe, Roadmap, Stage};

const PENDING: char = '○';
const DONE: char = '●';

fn keyframe_symbol(keyframe: &Keyframe) -> char {
    if keyframe.completed {
        DONE
    } else {
        PENDING
    }
}

/// Render a roadmap as an ASCII tree with completion markers.
///
/// Example output:
/// ```text
/// Graph Theory (50% complete)
/// └── Basics [beginner] 1/2
///     ├── ● What is a graph
///     └── ○ Adjacency lists
/// ```
pub fn render_tree(roadmap: &Roadmap) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{} ({:.0}% complete)\n",
        roadmap.topic,
        roadmap.total_progress()
    ));

    for (i, stage) in roadmap.stages.iter().enumerate() {
        let is_last = i == roadmap.stages.len() - 1;
        render_stage(&mut output, stage, is_last);
    }
    output
}

fn render_stage(output: &mut String, stage: &Stage, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push_str(&format!(
        "{} [{}] {}/{}\n",
        stage.name,
        stage.level,
        stage.completed_keyframes(),
        stage.total_keyframes()
    ));

    let prefix = if is_last { "    " } else { "│   " };
    for (i, keyframe) in stage.keyframes.iter().enumerate() {
        let keyframe_branch = if i == stage.keyframes.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(prefix);
        output.push_str(keyframe_branch);
        output.push(keyframe_symbol(keyframe));
        output.push(' ');
        output.push_str(&keyframe.title);
        output.push('\n');
    }
}
