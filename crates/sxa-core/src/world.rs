use std::collections::{BTreeSet, HashMap};

use crate::error::{WorldError, WorldResult};
use crate::location::{Location, normalize_id};
use crate::search::depth_first_search;

/// The world graph. Owns every location and the directed connections
/// between them.
///
/// Connections are added while the world is being assembled and never
/// removed afterwards; location contents (enemies, visited flags) keep
/// changing throughout play.
#[derive(Debug, Clone, Default)]
pub struct WorldGraph {
    locations: HashMap<String, Location>,
    adjacency: HashMap<String, BTreeSet<String>>,
}

impl WorldGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Assembly
    // -----------------------------------------------------------------------

    /// Add a location. Fails if a location with the same id exists.
    pub fn add_location(&mut self, location: Location) -> WorldResult<()> {
        if self.locations.contains_key(location.id()) {
            return Err(WorldError::DuplicateLocation(location.id().to_string()));
        }
        self.locations.insert(location.id().to_string(), location);
        Ok(())
    }

    /// Add a one-way connection. Both endpoints must already exist.
    pub fn connect(&mut self, from: &str, to: &str) -> WorldResult<()> {
        let from = normalize_id(from);
        let to = normalize_id(to);
        if !self.locations.contains_key(&from) {
            return Err(WorldError::LocationNotFound(from));
        }
        if !self.locations.contains_key(&to) {
            return Err(WorldError::DanglingConnection { from, to });
        }
        self.adjacency.entry(from).or_default().insert(to);
        Ok(())
    }

    /// Add connections in both directions.
    pub fn connect_both(&mut self, a: &str, b: &str) -> WorldResult<()> {
        self.connect(a, b)?;
        self.connect(b, a)
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    /// Get a location by id.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Get a mutable location by id.
    pub fn location_mut(&mut self, id: &str) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    /// Whether a location id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    /// Iterate over all locations in arbitrary order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// All location ids, sorted.
    pub fn location_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.locations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of one-way connections.
    pub fn connection_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }

    /// Replace the whole location map, keeping the connections.
    ///
    /// Every location that appears in the adjacency map must be present in
    /// the replacement; otherwise nothing is changed.
    pub fn replace_locations(&mut self, locations: Vec<Location>) -> WorldResult<()> {
        let mut replacement = HashMap::with_capacity(locations.len());
        for location in locations {
            let id = location.id().to_string();
            if replacement.insert(id.clone(), location).is_some() {
                return Err(WorldError::DuplicateLocation(id));
            }
        }

        for (from, targets) in &self.adjacency {
            if !replacement.contains_key(from) {
                return Err(WorldError::MissingReplacement(from.clone()));
            }
            if let Some(missing) = targets.iter().find(|t| !replacement.contains_key(*t)) {
                return Err(WorldError::MissingReplacement(missing.clone()));
            }
        }

        self.locations = replacement;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Graph traversal
    // -----------------------------------------------------------------------

    /// Direct neighbours of a location (empty if it has none or does not exist).
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.adjacency
            .get(id)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `to` is reachable from `from` in exactly one move.
    pub fn is_adjacent(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Depth-first search for locations whose `key` property equals `value`,
    /// starting at `start`. See [`depth_first_search`].
    pub fn search_properties(&self, start: &str, key: &str, value: &str) -> Vec<String> {
        depth_first_search(self, start, key, value)
    }
}
