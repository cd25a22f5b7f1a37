//! ASCII maze layouts.
//!
//! A layout is a rectangle of single-character tiles, one line per row:
//!
//! ```text
//! #   wall
//! .   pellet
//!     (space) empty walkable cell
//! F   power pellet
//! S   player spawn
//! B P I C   pursuer spawns (one per identity)
//! W   warp (recorded, placeholder — no movement semantics)
//! ```
//!
//! Every non-wall cell is connected to its in-bounds non-wall
//! 4-neighbors; markers never block connectivity, only `#` does. Any
//! other character rejects the whole maze.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::game::graph::{Graph, Vertex};
use crate::game::pursuer::PursuerKind;

/// What kind of pellet a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PelletKind {
    /// Ordinary pellet.
    Normal,
    /// Power pellet: extra points plus an invincibility window.
    Power,
}

/// A parsed, validated maze: the walkability graph plus the side data
/// collected during the scan.
#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    graph: Graph,
    pellets: Vec<Vec<Option<PelletKind>>>,
    total_pellets: usize,
    player_spawn: Vertex,
    pursuer_spawns: Vec<(PursuerKind, Vertex)>,
    warps: Vec<Vertex>,
}

const WALL: char = '#';

fn pursuer_kind(tile: char) -> Option<PursuerKind> {
    match tile {
        'B' => Some(PursuerKind::Blinky),
        'P' => Some(PursuerKind::Pinky),
        'I' => Some(PursuerKind::Inky),
        'C' => Some(PursuerKind::Clyde),
        _ => None,
    }
}

impl Maze {
    /// Parse a maze from its textual layout.
    ///
    /// # Errors
    ///
    /// Returns a [`MazeError`] for an empty or ragged layout, an
    /// unrecognized tile, or a missing/duplicated player spawn.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().collect())
            .collect();
        let height = rows.len();
        if height == 0 {
            return Err(MazeError::Empty);
        }
        let width = rows[0].len();
        if width == 0 {
            return Err(MazeError::Empty);
        }
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::RaggedRow { row: y });
            }
        }

        let mut graph = Graph::new();
        let mut pellets = vec![vec![None; width]; height];
        let mut total_pellets = 0;
        let mut player_spawn = None;
        let mut pursuer_spawns = Vec::new();
        let mut warps = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, &tile) in row.iter().enumerate() {
                let vertex = Vertex::new(x as i32, y as i32);

                if tile != WALL {
                    let shifts = [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)];
                    for (dx, dy) in shifts {
                        let nx = vertex.x + dx;
                        let ny = vertex.y + dy;
                        let in_bounds =
                            nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height;
                        if in_bounds && rows[ny as usize][nx as usize] != WALL {
                            graph.add_edge(vertex, Vertex::new(nx, ny));
                        }
                    }
                }

                match tile {
                    '.' => {
                        pellets[y][x] = Some(PelletKind::Normal);
                        total_pellets += 1;
                    }
                    'F' => {
                        pellets[y][x] = Some(PelletKind::Power);
                        total_pellets += 1;
                    }
                    'S' => {
                        if player_spawn.is_some() {
                            return Err(MazeError::DuplicatePlayerSpawn { x, y });
                        }
                        player_spawn = Some(vertex);
                    }
                    'W' => warps.push(vertex),
                    WALL | ' ' => {}
                    _ => {
                        if let Some(kind) = pursuer_kind(tile) {
                            pursuer_spawns.push((kind, vertex));
                        } else {
                            return Err(MazeError::UnknownTile { tile, x, y });
                        }
                    }
                }
            }
        }

        let player_spawn = player_spawn.ok_or(MazeError::MissingPlayerSpawn)?;

        Ok(Self {
            width,
            height,
            graph,
            pellets,
            total_pellets,
            player_spawn,
            pursuer_spawns,
            warps,
        })
    }

    /// Read and parse a maze layout file.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::Io`] if the file cannot be read, otherwise
    /// anything [`Maze::parse`] can return.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The walkability graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Initial pellet grid, row-major.
    #[must_use]
    pub fn pellets(&self) -> &[Vec<Option<PelletKind>>] {
        &self.pellets
    }

    /// Initial pellet count, both kinds.
    #[must_use]
    pub const fn total_pellets(&self) -> usize {
        self.total_pellets
    }

    /// The player spawn cell.
    #[must_use]
    pub const fn player_spawn(&self) -> Vertex {
        self.player_spawn
    }

    /// Pursuer spawn cells with identities, in scan order.
    #[must_use]
    pub fn pursuer_spawns(&self) -> &[(PursuerKind, Vertex)] {
        &self.pursuer_spawns
    }

    /// Warp cells, in scan order. Placeholder: warps have no movement
    /// semantics yet.
    #[must_use]
    pub fn warps(&self) -> &[Vertex] {
        &self.warps
    }
}
