//! Depth-first property search over the world graph.

use std::collections::HashSet;

use crate::world::WorldGraph;

/// Walk the graph depth-first from `start` and collect the ids of every
/// reachable location whose `key` property equals `value` exactly.
///
/// Each location is visited at most once, so the result never holds
/// duplicates. Results are in visitation order; callers should treat them
/// as a set. An unknown start location yields no results.
pub fn depth_first_search(world: &WorldGraph, start: &str, key: &str, value: &str) -> Vec<String> {
    let mut found = Vec::new();
    if !world.contains(start) {
        return found;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![start];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }

        if world
            .location(id)
            .and_then(|loc| loc.property(key))
            .is_some_and(|v| v == value)
        {
            found.push(id.to_string());
        }

        // Push in reverse so the first neighbour is explored first.
        for neighbor in world.neighbors(id).into_iter().rev() {
            if !visited.contains(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    tracing::debug!(start, key, value, hits = found.len(), "property search");
    found
}
