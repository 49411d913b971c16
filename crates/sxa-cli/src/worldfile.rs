//! Loader for the plain-text world files.
//!
//! A world directory holds:
//!
//! - `locations.txt`: an id line followed by a description line, repeated.
//! - `connections.txt`: an id line, a count line, that many neighbour id
//!   lines, and a separator line, repeated.
//! - `enemies.txt`: location id, name, max health, and attack power lines,
//!   repeated. Blank lines between blocks are ignored.
//! - `properties.txt` (optional): `location_id key=value` lines. Blank lines
//!   and `#` comments are ignored.
//!
//! Blocks naming an unknown location are skipped with a warning. Anything
//! else malformed is an error pointing at the file and line.

use std::collections::HashSet;
use std::fs;
use std::iter::{Enumerate, Peekable};
use std::path::{Path, PathBuf};
use std::str::Lines;

use sxa_core::{Enemy, Location, WorldError, WorldGraph, normalize_id};
use thiserror::Error;

/// Location list file name.
pub const LOCATIONS_FILE: &str = "locations.txt";
/// Connection list file name.
pub const CONNECTIONS_FILE: &str = "connections.txt";
/// Enemy roster file name.
pub const ENEMIES_FILE: &str = "enemies.txt";
/// Optional property file name.
pub const PROPERTIES_FILE: &str = "properties.txt";

/// Errors raised while loading a world directory.
#[derive(Debug, Error)]
pub enum WorldFileError {
    /// A required file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A file is malformed.
    #[error("{file}:{line}: {message}")]
    Parse {
        /// File name.
        file: &'static str,
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The assembled graph is inconsistent.
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Load every world file in `dir` into a graph.
pub fn load_world_dir(dir: &Path) -> Result<WorldGraph, WorldFileError> {
    let mut world = WorldGraph::new();
    for location in parse_locations(&read(dir, LOCATIONS_FILE)?)? {
        world.add_location(location)?;
    }
    apply_connections(&mut world, &read(dir, CONNECTIONS_FILE)?)?;
    apply_enemies(&mut world, &read(dir, ENEMIES_FILE)?)?;

    let properties = dir.join(PROPERTIES_FILE);
    if properties.exists() {
        apply_properties(&mut world, &read(dir, PROPERTIES_FILE)?)?;
    }

    tracing::debug!(
        dir = %dir.display(),
        locations = world.location_count(),
        connections = world.connection_count(),
        "world loaded"
    );
    Ok(world)
}

fn read(dir: &Path, name: &str) -> Result<String, WorldFileError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| WorldFileError::Io { path, source })
}

// ---------------------------------------------------------------------------
// Line cursor
// ---------------------------------------------------------------------------

struct Cursor<'a> {
    file: &'static str,
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> Cursor<'a> {
    fn new(file: &'static str, source: &'a str) -> Self {
        Self {
            file,
            lines: source.lines().enumerate().peekable(),
        }
    }

    /// Next line as (1-based number, trimmed text).
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.lines.next().map(|(i, line)| (i + 1, line.trim()))
    }

    fn next_non_blank(&mut self) -> Option<(usize, &'a str)> {
        loop {
            let (number, line) = self.next_line()?;
            if !line.is_empty() {
                return Some((number, line));
            }
        }
    }

    fn expect(&mut self, after: usize, what: &str) -> Result<(usize, &'a str), WorldFileError> {
        self.next_line()
            .ok_or_else(|| self.error(after, format!("unexpected end of file, expected {what}")))
    }

    fn expect_number(&mut self, after: usize, what: &str) -> Result<(usize, u32), WorldFileError> {
        let (number, line) = self.expect(after, what)?;
        line.parse::<u32>()
            .map(|value| (number, value))
            .map_err(|_| self.error(number, format!("invalid {what} \"{line}\"")))
    }

    fn peek_is_separator(&mut self) -> bool {
        self.lines
            .peek()
            .is_some_and(|(_, line)| is_separator(line))
    }

    fn error(&self, line: usize, message: String) -> WorldFileError {
        WorldFileError::Parse {
            file: self.file,
            line,
            message,
        }
    }
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().all(|c| !c.is_alphanumeric() && c != '_')
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Parse `locations.txt`.
pub fn parse_locations(source: &str) -> Result<Vec<Location>, WorldFileError> {
    let mut cursor = Cursor::new(LOCATIONS_FILE, source);
    let mut seen = HashSet::new();
    let mut locations = Vec::new();

    while let Some((number, id)) = cursor.next_non_blank() {
        let location = Location::new(id);
        if !seen.insert(location.id().to_string()) {
            return Err(cursor.error(number, format!("duplicate location \"{}\"", location.id())));
        }
        let description = cursor.next_line().map(|(_, line)| line).unwrap_or_default();
        locations.push(location.with_description(description));
    }

    Ok(locations)
}

/// Parse `connections.txt` and add every connection to `world`.
///
/// Returns the number of connections added.
pub fn apply_connections(world: &mut WorldGraph, source: &str) -> Result<usize, WorldFileError> {
    let mut cursor = Cursor::new(CONNECTIONS_FILE, source);
    let mut added = 0;

    while let Some((number, raw)) = cursor.next_non_blank() {
        let from = normalize_id(raw);
        let (count_line, count) = cursor.expect_number(number, "connection count")?;

        let mut targets = Vec::new();
        let mut last = count_line;
        for _ in 0..count {
            let (n, target) = cursor.expect(last, "a connected location")?;
            targets.push((n, normalize_id(target)));
            last = n;
        }
        if cursor.peek_is_separator() {
            cursor.next_line();
        }

        if !world.contains(&from) {
            tracing::warn!(
                file = CONNECTIONS_FILE,
                line = number,
                location = %from,
                "unknown location, skipping block"
            );
            continue;
        }
        for (n, target) in targets {
            world
                .connect(&from, &target)
                .map_err(|e| cursor.error(n, e.to_string()))?;
            added += 1;
        }
    }

    Ok(added)
}

/// Parse `enemies.txt` and station every enemy at its location.
///
/// Returns the number of enemies placed.
pub fn apply_enemies(world: &mut WorldGraph, source: &str) -> Result<usize, WorldFileError> {
    let mut cursor = Cursor::new(ENEMIES_FILE, source);
    let mut placed = 0;

    while let Some((number, raw)) = cursor.next_non_blank() {
        let id = normalize_id(raw);
        let (name_line, name) = cursor.expect(number, "an enemy name")?;
        let (health_line, health) = cursor.expect_number(name_line, "health")?;
        let (_, attack) = cursor.expect_number(health_line, "attack power")?;

        match world.location_mut(&id) {
            Some(location) => {
                location.add_enemy(Enemy::new(name, health, attack));
                placed += 1;
            }
            None => {
                tracing::warn!(
                    file = ENEMIES_FILE,
                    line = number,
                    location = %id,
                    "unknown location, skipping enemy"
                );
            }
        }
    }

    Ok(placed)
}

/// Parse `properties.txt` and set every property on its location.
///
/// Returns the number of properties set.
pub fn apply_properties(world: &mut WorldGraph, source: &str) -> Result<usize, WorldFileError> {
    let mut cursor = Cursor::new(PROPERTIES_FILE, source);
    let mut set = 0;

    while let Some((number, line)) = cursor.next_non_blank() {
        if line.starts_with('#') {
            continue;
        }

        let parsed = line
            .split_once(char::is_whitespace)
            .and_then(|(id, rest)| rest.split_once('=').map(|(k, v)| (id, k.trim(), v.trim())));
        let Some((id, key, value)) = parsed.filter(|(_, key, _)| !key.is_empty()) else {
            let message = format!("expected \"location key=value\", got \"{line}\"");
            return Err(cursor.error(number, message));
        };

        match world.location_mut(&normalize_id(id)) {
            Some(location) => {
                location.set_property(key, value);
                set += 1;
            }
            None => {
                tracing::warn!(
                    file = PROPERTIES_FILE,
                    line = number,
                    location = id,
                    "unknown location, skipping property"
                );
            }
        }
    }

    Ok(set)
}
