//! Mazebound CLI - headless runner for the maze-chase simulation.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Mazebound - a deterministic maze-chase simulation
#[derive(Parser, Debug)]
#[command(name = "mazebound")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a headless simulation of a maze
    Run {
        /// Maze layout file
        #[arg(required = true)]
        maze: std::path::PathBuf,

        /// Tunables file (JSON; defaults used when absent)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Maximum ticks to simulate (default: 3600)
        #[arg(short, long, default_value = "3600")]
        ticks: u32,

        /// Simulation ticks per second (default: 60)
        #[arg(long, default_value = "60")]
        tick_rate: u32,

        /// Key script, one character per tick: u, d, l, r or .
        /// The last character stays held once the script runs out.
        #[arg(short, long)]
        script: Option<String>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Validate a maze layout file
    Validate {
        /// Maze layout file to validate
        #[arg(required = true)]
        maze: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            maze,
            config,
            ticks,
            tick_rate,
            script,
            format,
        } => cli::run::execute(maze, config, ticks, tick_rate, script, format),

        Commands::Validate { maze } => cli::validate::execute(maze),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
