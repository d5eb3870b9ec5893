//! Trailmap: learning roadmap tracking for agent-assisted study planning.
//!
//! A roadmap is a tree: ordered stages at a learning level, ordered
//! keyframes inside stages, resources on keyframes. Progress is derived
//! from current state, completion is an explicit one-way latch, and each
//! roadmap persists as a single JSON document.

pub mod generator;
pub mod mcp;
pub mod models;
pub mod render;
pub mod store;
