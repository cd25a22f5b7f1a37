//! Validate command implementation.

use super::CliError;
use mazebound::Maze;
use std::path::PathBuf;

/// Execute the validate command: parse a layout and report what it
/// contains without running anything.
///
/// # Errors
///
/// Returns an error if the layout cannot be read or does not parse.
pub(crate) fn execute(maze: PathBuf) -> Result<(), CliError> {
    let maze = Maze::from_file(&maze)?;

    println!("valid maze: {}x{} cells", maze.width(), maze.height());
    println!("walkable:   {} cells", maze.graph().vertex_count());
    println!("pellets:    {}", maze.total_pellets());
    let spawn = maze.player_spawn();
    println!("spawn:      ({}, {})", spawn.x, spawn.y);
    for (kind, vertex) in maze.pursuer_spawns() {
        println!("pursuer:    {kind:?} at ({}, {})", vertex.x, vertex.y);
    }
    for warp in maze.warps() {
        println!("warp:       ({}, {})", warp.x, warp.y);
    }

    Ok(())
}
