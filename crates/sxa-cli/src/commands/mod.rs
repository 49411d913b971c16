pub mod check;
pub mod play;
pub mod search;

use std::path::Path;

use sxa_core::WorldGraph;

use crate::worldfile;

/// Load a world directory, turning loader errors into CLI messages.
fn load_world(dir: &Path) -> Result<WorldGraph, String> {
    worldfile::load_world_dir(dir)
        .map_err(|e| format!("failed to load world from {}: {e}", dir.display()))
}
