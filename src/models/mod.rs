//! Domain models for Trailmap.
//!
//! # Core Concepts
//!
//! A roadmap is an exclusive, tree-shaped aggregate:
//!
//! - [`Roadmap`]: a full learning plan for one topic, the unit of
//!   persistence.
//! - [`Stage`]: a named phase at one [`LearningLevel`], holding ordered
//!   keyframes.
//! - [`Keyframe`]: an atomic checklist item, optionally dated, optionally
//!   linked to resources.
//! - [`Resource`]: an external reference (title, url, description).
//!
//! Progress is always derived from current child state; it is never
//! cached. Completion is a separate, explicit one-way latch at every
//! level: `mark_complete` transitions incomplete to completed, and nothing
//! transitions back.

mod keyframe;
mod level;
mod resource;
mod roadmap;
mod stage;

pub use keyframe::*;
pub use level::*;
pub use resource::*;
pub use roadmap::*;
pub use stage::*;
