use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trailmap::models::RoadmapLevel;
use trailmap::store::RoadmapStore;
use trailmap::{generator, mcp, render};

#[derive(Parser)]
#[command(name = "trailmap")]
#[command(about = "Learning roadmap tracker for agent-assisted study planning")]
struct Cli {
    /// Directory holding the roadmap documents (defaults to the platform
    /// data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter roadmap for a topic and print it
    New {
        topic: String,

        /// beginner, intermediate, advanced, refresher, or full
        #[arg(short, long, default_value = "beginner")]
        level: RoadmapLevel,
    },
    /// List stored roadmaps with their progress
    List,
    /// Show a roadmap as a tree
    Show { topic: String },
    /// Report per-stage and overall progress
    Progress { topic: String },
    /// Mark a keyframe, a stage, or the whole roadmap as completed
    Complete {
        topic: String,

        /// Zero-based stage index (omit to complete the roadmap itself)
        #[arg(short, long)]
        stage: Option<usize>,

        /// Zero-based keyframe index within the stage
        #[arg(short, long, requires = "stage")]
        keyframe: Option<usize>,
    },
    /// Delete a stored roadmap
    Delete { topic: String },
    /// Start the MCP tool server via stdio (for agent integration)
    Mcp,
}

/// Initialize tracing with output to stderr (for MCP mode) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "trailmap=info".into()),
    );

    if use_stderr {
        // MCP mode: log to stderr so stdout is clean for protocol
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_store(data_dir: Option<PathBuf>) -> anyhow::Result<RoadmapStore> {
    match data_dir {
        Some(dir) => Ok(RoadmapStore::open(dir)?),
        None => RoadmapStore::open_default(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // MCP mode needs stderr for logging since stdout is the protocol channel
    let use_stderr = matches!(cli.command, Commands::Mcp);
    init_tracing(use_stderr);

    let store = open_store(cli.data_dir)?;

    match cli.command {
        Commands::New { topic, level } => {
            if store.contains(&topic) {
                anyhow::bail!("a roadmap for '{topic}' already exists");
            }
            let roadmap = generator::new_roadmap(&topic, level);
            let path = store.save(&roadmap)?;
            println!("Created {}", path.display());
            println!();
            print!("{}", render::render_tree(&roadmap));
        }
        Commands::List => {
            let summaries = store.list()?;
            if summaries.is_empty() {
                println!("No roadmaps yet. Create one with `tmap new <topic>`.");
                return Ok(());
            }
            for summary in summaries {
                let level = summary.level.map(|l| l.as_str()).unwrap_or("-");
                let done = if summary.completed { " (completed)" } else { "" };
                println!(
                    "{} [{}] {} stages, {:.1}%{}",
                    summary.topic, level, summary.stages, summary.progress, done
                );
            }
        }
        Commands::Show { topic } => {
            let roadmap = store.load(&topic)?;
            print!("{}", render::render_tree(&roadmap));
        }
        Commands::Progress { topic } => {
            let roadmap = store.load(&topic)?;
            for (i, stage) in roadmap.stages.iter().enumerate() {
                let done = if stage.completed { " (completed)" } else { "" };
                println!(
                    "[{i}] {} [{}]: {}/{} keyframes, {:.1}%{}",
                    stage.name,
                    stage.level,
                    stage.completed_keyframes(),
                    stage.total_keyframes(),
                    stage.progress_percent(),
                    done
                );
            }
            let done = if roadmap.completed { " (completed)" } else { "" };
            println!("Overall: {:.1}%{}", roadmap.total_progress(), done);
        }
        Commands::Complete {
            topic,
            stage,
            keyframe,
        } => {
            let mut roadmap = store.load(&topic)?;
            match (stage, keyframe) {
                (None, _) => {
                    roadmap.mark_complete();
                    println!("Marked roadmap '{topic}' as completed");
                }
                (Some(s), None) => {
                    let stage = roadmap
                        .stages
                        .get_mut(s)
                        .with_context(|| format!("stage index {s} out of range"))?;
                    stage.mark_complete();
                    println!("Marked stage '{}' as completed", stage.name);
                }
                (Some(s), Some(k)) => {
                    let stage = roadmap
                        .stages
                        .get_mut(s)
                        .with_context(|| format!("stage index {s} out of range"))?;
                    let keyframe = stage
                        .keyframes
                        .get_mut(k)
                        .with_context(|| format!("keyframe index {k} out of range"))?;
                    keyframe.mark_complete();
                    println!("Marked keyframe '{}' as completed", keyframe.title);
                }
            }
            store.save(&roadmap)?;
            println!("Overall: {:.1}%", roadmap.total_progress());
        }
        Commands::Delete { topic } => {
            if store.delete(&topic)? {
                println!("Deleted roadmap '{topic}'");
            } else {
                println!("No roadmap stored for '{topic}'");
            }
        }
        Commands::Mcp => {
            mcp::run_stdio_server(store).await?;
        }
    }

    Ok(())
}
