use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use sxa_engine::{Command, GameConfig, GameSession, MissionCatalog, parse_command};

use crate::console::ConsoleSink;

pub fn run(
    dir: &Path,
    seed: u64,
    save: Option<PathBuf>,
    start: Option<&str>,
) -> Result<(), String> {
    let world = super::load_world(dir)?;

    let mut config = GameConfig::default().with_seed(seed);
    if let Some(path) = save {
        config = config.with_save_path(path);
    }
    if let Some(id) = start {
        config = config.with_start_location(id);
    }

    println!("  {} Space Exploration Adventure", "Starting".bold());
    println!("  Seed: {seed} | Save file: {}", config.save_path.display());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let catalog = MissionCatalog::standard();
    let mut session = GameSession::new(world, catalog, config, ConsoleSink::stdout())
        .map_err(|e| format!("failed to start session: {e}"))?;
    println!();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!(
            "[{} | energy {} | score {}] > ",
            session.current_location(),
            session.energy(),
            session.score()
        );
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = parse_command(input);
        if command == Command::Quit {
            println!("Safe travels, explorer.");
            break;
        }

        let was_over = session.is_over();
        if let Err(e) = session.execute(command) {
            println!("{}", e.to_string().yellow());
        }
        if session.is_over() && !was_over {
            println!(
                "\nType 'restart' for a new game, 'load' to resume your save, or 'quit' to exit."
            );
        }
        println!();
    }

    Ok(())
}
