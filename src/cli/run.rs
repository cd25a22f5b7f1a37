//! Run command implementation.

use super::{CliError, OutputFormat};
use mazebound::{Board, Config, Direction, KeyState, Maze};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Final state of a finished (or truncated) headless run.
#[derive(Debug, Serialize)]
struct RunSummary {
    ticks_run: u32,
    outcome: &'static str,
    #[serde(flatten)]
    state: mazebound::Snapshot,
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the maze or config cannot be loaded, the script
/// contains an unknown character, or output serialization fails.
pub(crate) fn execute(
    maze: PathBuf,
    config: Option<PathBuf>,
    ticks: u32,
    tick_rate: u32,
    script: Option<String>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let maze = Maze::from_file(&maze)
        .map_err(|e| CliError::new(format!("failed to load maze: {e}")))?;

    let config: Config = match config {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|e| {
                CliError::new(format!("failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&text)
                .map_err(|e| CliError::new(format!("invalid config: {e}")))?
        }
        None => Config::default(),
    };
    config
        .validate()
        .map_err(|e| CliError::new(format!("invalid config: {e}")))?;

    if tick_rate == 0 {
        return Err(CliError::new("tick rate must be positive"));
    }
    let keys = parse_script(script.as_deref().unwrap_or(""))?;

    let mut board = Board::new(&maze, config);
    #[allow(clippy::cast_precision_loss)]
    let delta_time = 1.0 / tick_rate as f32;

    let mut ticks_run = 0;
    for tick in 0..ticks {
        // The script supplies one key state per tick; once it runs out,
        // the last key stays held.
        let held = keys
            .get(tick as usize)
            .or_else(|| keys.last())
            .copied()
            .unwrap_or(KeyState::NONE);
        board.step(delta_time, held);
        ticks_run = tick + 1;
        if board.is_game_over() {
            break;
        }
    }

    let outcome = if board.has_won() {
        "won"
    } else if board.has_lost() {
        "lost"
    } else {
        "timeout"
    };

    match format {
        OutputFormat::Text => {
            let snapshot = board.snapshot();
            println!("outcome: {outcome} after {ticks_run} ticks");
            println!("score:   {}", snapshot.score);
            println!("lives:   {}", snapshot.lives);
            println!("pellets: {} remaining", snapshot.pellets_remaining);
        }
        OutputFormat::Json => {
            let summary = RunSummary {
                ticks_run,
                outcome,
                state: board.snapshot(),
            };
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Parse a key script: one character per tick, `u`/`d`/`l`/`r` for a
/// held direction key and `.` for no key.
fn parse_script(script: &str) -> Result<Vec<KeyState>, CliError> {
    script
        .chars()
        .map(|c| match c {
            'u' => Ok(KeyState::only(Direction::Up)),
            'd' => Ok(KeyState::only(Direction::Down)),
            'l' => Ok(KeyState::only(Direction::Left)),
            'r' => Ok(KeyState::only(Direction::Right)),
            '.' => Ok(KeyState::NONE),
            _ => Err(CliError::new(format!(
                "unknown script character {c:?} (expected u, d, l, r or .)"
            ))),
        })
        .collect()
}
