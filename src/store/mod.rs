//! File-backed persistence for roadmaps.
//!
//! Each roadmap is stored as one JSON document named after its topic
//! inside the store directory. The document is the unit of persistence;
//! there is no cross-document index. Documents are written atomically:
//! the full serialization goes to a sibling temp file which is renamed
//! into place, so a failed save never leaves a truncated document behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result as AnyResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::models::{Roadmap, RoadmapLevel};

/// Failures surfaced by the store and the document codec.
///
/// Every failure is returned to the immediate caller with the offending
/// path attached; nothing is swallowed or retried here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested document does not exist. Never silently defaulted to
    /// an empty roadmap.
    #[error("roadmap document not found: {path}")]
    NotFound { path: PathBuf },

    /// The document exists but is not a valid roadmap: a required field is
    /// absent or of the wrong shape. The source error names the field.
    #[error("malformed roadmap document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying read/write failure.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;

fn io_err(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Serialize `roadmap` to `path`, overwriting any existing document.
///
/// The document uses 4-space indentation for human readability.
pub fn save_to_path(roadmap: &Roadmap, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    roadmap
        .serialize(&mut ser)
        .map_err(|e| io_err(path, io::Error::other(e)))?;
    buf.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &buf).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Load a roadmap document from `path`.
///
/// Either returns a fully-constructed roadmap or an error; a document
/// missing required fields is rejected whole, never half-constructed.
pub fn load_from_path(path: &Path) -> Result<Roadmap> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(io_err(path, e)),
    };

    serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// A directory of roadmap documents.
#[derive(Debug, Clone)]
pub struct RoadmapStore {
    dir: PathBuf,
}

impl RoadmapStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        Ok(Self { dir })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> AnyResult<Self> {
        let dirs = directories::ProjectDirs::from("", "", "trailmap")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::open(dirs.data_dir().join("roadmaps"))?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document that stores `topic`.
    pub fn path_for(&self, topic: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(topic)))
    }

    /// Whether a document for `topic` already exists.
    pub fn contains(&self, topic: &str) -> bool {
        self.path_for(topic).is_file()
    }

    /// Persist `roadmap` under its topic, returning the document path.
    pub fn save(&self, roadmap: &Roadmap) -> Result<PathBuf> {
        let path = self.path_for(&roadmap.topic);
        save_to_path(roadmap, &path)?;
        Ok(path)
    }

    pub fn load(&self, topic: &str) -> Result<Roadmap> {
        load_from_path(&self.path_for(topic))
    }

    /// Remove the document for `topic`. Returns whether it existed.
    pub fn delete(&self, topic: &str) -> Result<bool> {
        let path = self.path_for(topic);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    /// Summaries of every decodable document, sorted by topic.
    ///
    /// Files that fail to decode are skipped with a warning; an explicitly
    /// requested [`RoadmapStore::load`] never skips.
    pub fn list(&self) -> Result<Vec<RoadmapSummary>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let mut summaries = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match load_from_path(&path) {
                Ok(roadmap) => summaries.push(RoadmapSummary::of(&roadmap)),
                Err(e) => tracing::warn!("skipping undecodable document: {e}"),
            }
        }

        summaries.sort_by(|a, b| a.topic.cmp(&b.topic));
        Ok(summaries)
    }
}

/// One row of [`RoadmapStore::list`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapSummary {
    pub topic: String,
    pub level: Option<RoadmapLevel>,
    pub stages: usize,
    pub progress: f64,
    pub completed: bool,
}

impl RoadmapSummary {
    fn of(roadmap: &Roadmap) -> Self {
        Self {
            topic: roadmap.topic.clone(),
            level: roadmap.level,
            stages: roadmap.stages.len(),
            progress: roadmap.total_progress(),
            completed: roadmap.completed,
        }
    }
}

/// Reduce a topic to a safe file stem.
///
/// Path separators and control characters become underscores; a topic
/// with nothing else left falls back to "roadmap".
fn file_stem(topic: &str) -> String {
    let stem: String = topic
        .trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if stem.chars().all(|c| c == '_' || c == '.') {
        "roadmap".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::file_stem;

    #[test]
    fn test_plain_topic_keeps_its_name() {
        assert_eq!(file_stem("Roman Empire History"), "Roman Empire History");
    }

    #[test]
    fn test_separators_are_replaced() {
        assert_eq!(file_stem("tcp/ip"), "tcp_ip");
        assert_eq!(file_stem("a\\b"), "a_b");
    }

    #[test]
    fn test_degenerate_topic_falls_back() {
        assert_eq!(file_stem("///"), "roadmap");
        assert_eq!(file_stem(".."), "roadmap");
    }
}
