//! Core types for Space Exploration Adventure: locations, enemies, and the
//! world graph.
//!
//! This crate holds the data the game session plays on. It knows nothing
//! about world files or save games. You can assemble a [`WorldGraph`]
//! programmatically or hand it whatever a loader produced.

/// Hostile entities that live at locations.
pub mod enemy;
/// Error types used throughout the crate.
pub mod error;
/// Locations (graph nodes) and their contents.
pub mod location;
/// Depth-first property search over the world graph.
pub mod search;
/// The world graph that owns locations and their connections.
pub mod world;

/// Re-export enemy type.
pub use enemy::Enemy;
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export location types.
pub use location::{Location, normalize_id};
/// Re-export search entry point.
pub use search::depth_first_search;
/// Re-export world graph.
pub use world::WorldGraph;
