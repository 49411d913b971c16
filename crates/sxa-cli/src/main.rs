//! CLI frontend for Space Exploration Adventure.

mod commands;
mod console;
mod worldfile;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// World directory used when `--dir` is not given.
const DEFAULT_WORLD_DIR: &str = "worlds/default";

#[derive(Parser)]
#[command(
    name = "sxa",
    about = "Space Exploration Adventure: explore the galaxy, fight, and complete missions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive game
    Play {
        /// Directory containing the world files
        #[arg(short, long, default_value = DEFAULT_WORLD_DIR)]
        dir: PathBuf,

        /// RNG seed for reproducible fights and missions (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file used by the save and load commands
        #[arg(long)]
        save: Option<PathBuf>,

        /// Starting location (default: earth)
        #[arg(long)]
        start: Option<String>,
    },

    /// Validate the world files and print a summary
    Check {
        /// Directory containing the world files
        #[arg(short, long, default_value = DEFAULT_WORLD_DIR)]
        dir: PathBuf,
    },

    /// Find reachable locations whose property matches a value
    Search {
        /// Property key (e.g. atmosphere)
        key: String,

        /// Exact property value
        value: String,

        /// Location to search from
        #[arg(short, long, default_value = "earth")]
        from: String,

        /// Directory containing the world files
        #[arg(short, long, default_value = DEFAULT_WORLD_DIR)]
        dir: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sxa=warn,sxa_core=warn,sxa_engine=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            dir,
            seed,
            save,
            start,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            commands::play::run(&dir, seed, save, start.as_deref())
        }
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Search {
            key,
            value,
            from,
            dir,
        } => commands::search::run(&dir, &key, &value, &from),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
