use std::path::Path;

use colored::Colorize;
use sxa_engine::{GameConfig, MissionCatalog};

pub fn run(dir: &Path) -> Result<(), String> {
    let world = super::load_world(dir)?;
    let config = GameConfig::default();

    if !world.contains(&config.start_location) {
        return Err(format!(
            "start location '{}' is missing",
            config.start_location
        ));
    }

    let mut warnings = 0;
    for id in &config.critical_locations {
        if !world.contains(id) {
            println!(
                "  {} critical location '{id}' is missing",
                "warning:".yellow()
            );
            warnings += 1;
        }
    }
    for mission in MissionCatalog::standard().templates() {
        let Some(target) = world.location(mission.target_location()) else {
            println!(
                "  {} mission '{}' targets unknown location '{}'",
                "warning:".yellow(),
                mission.title(),
                mission.target_location()
            );
            warnings += 1;
            continue;
        };
        if let Some(enemy) = mission.target_enemy() {
            if target.find_enemy(enemy).is_none() {
                println!(
                    "  {} mission '{}' needs a {enemy} at '{}'",
                    "warning:".yellow(),
                    mission.title(),
                    mission.target_location()
                );
                warnings += 1;
            }
        }
    }

    let enemies: usize = world.locations().map(|loc| loc.enemies().len()).sum();
    let properties: usize = world.locations().map(|loc| loc.properties().len()).sum();

    if warnings == 0 {
        println!("  All checks passed for '{}'.", dir.display());
    } else {
        println!(
            "  Checked '{}' with {warnings} warning{}.",
            dir.display(),
            if warnings == 1 { "" } else { "s" }
        );
    }
    println!(
        "  {} locations, {} connections, {enemies} enemies, {properties} properties",
        world.location_count(),
        world.connection_count()
    );

    Ok(())
}
