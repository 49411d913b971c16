use std::collections::HashMap;
use std::fmt;

use crate::enemy::Enemy;

/// Normalize a user- or file-supplied location id (trimmed, lower-case).
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// A node in the world graph: a planet, moon, or station the player can visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    id: String,
    /// Free-text description shown on arrival.
    pub description: String,
    properties: HashMap<String, String>,
    enemies: Vec<Enemy>,
    visited: bool,
}

impl Location {
    /// Create an empty location. The id is normalized to lower case.
    pub fn new(id: &str) -> Self {
        Self {
            id: normalize_id(id),
            description: String::new(),
            properties: HashMap::new(),
            enemies: Vec::new(),
            visited: false,
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Builder-style enemy setter.
    pub fn with_enemy(mut self, enemy: Enemy) -> Self {
        self.add_enemy(enemy);
        self
    }

    /// The normalized location id.
    pub fn id(&self) -> &str {
        &self.id
    }

    // -----------------------------------------------------------------------
    // Visited flag
    // -----------------------------------------------------------------------

    /// Whether the player has ever been here.
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Set the visited flag.
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    /// Set (or overwrite) a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Look up a property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All properties.
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    // -----------------------------------------------------------------------
    // Enemies
    // -----------------------------------------------------------------------

    /// Station an enemy here.
    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    /// Enemies currently present.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Whether any enemy is present.
    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    /// Index of the first enemy whose name contains `fragment` (case-insensitive).
    pub fn find_enemy(&self, fragment: &str) -> Option<usize> {
        self.enemies.iter().position(|e| e.name_contains(fragment))
    }

    /// Mutable access to an enemy by index.
    pub fn enemy_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.enemies.get_mut(index)
    }

    /// Remove an enemy by index, returning it.
    pub fn remove_enemy(&mut self, index: usize) -> Option<Enemy> {
        if index < self.enemies.len() {
            Some(self.enemies.remove(index))
        } else {
            None
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Location: {}\nDescription: {}",
            self.id, self.description
        )?;

        if !self.enemies.is_empty() {
            write!(f, "\nEnemies present: ")?;
            for enemy in &self.enemies {
                write!(f, "\n- {}", enemy.name())?;
            }
        }

        if !self.properties.is_empty() {
            write!(f, "\nProperties:")?;
            let mut keys: Vec<&String> = self.properties.keys().collect();
            keys.sort();
            for key in keys {
                write!(f, "\n- {}: {}", key, self.properties[key])?;
            }
        }

        Ok(())
    }
}
