use std::path::Path;

use sxa_core::{depth_first_search, normalize_id};

pub fn run(dir: &Path, key: &str, value: &str, from: &str) -> Result<(), String> {
    let world = super::load_world(dir)?;
    let start = normalize_id(from);
    if !world.contains(&start) {
        return Err(format!("unknown location '{start}'"));
    }

    let results = depth_first_search(&world, &start, key, value);

    if results.is_empty() {
        println!("  No locations with {key} = \"{value}\" reachable from {start}.");
        return Ok(());
    }

    println!(
        "  {} locations with {key} = \"{value}\" reachable from {start}:",
        results.len()
    );
    println!();

    for id in &results {
        println!("  {id}");
        let description = world
            .location(id)
            .map(|loc| loc.description.as_str())
            .unwrap_or_default();
        if !description.is_empty() {
            let preview = if description.chars().count() > 80 {
                format!("{}...", description.chars().take(77).collect::<String>())
            } else {
                description.to_string()
            };
            println!("    {}", preview.trim());
        }
    }

    Ok(())
}
