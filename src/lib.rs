// Allow unwrap and float comparison in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![cfg_attr(test, allow(clippy::field_reassign_with_default))]
//! Mazebound: a deterministic maze-chase simulation core.
//!
//! This crate provides the headless game logic for a grid maze chase:
//! - ASCII layouts parsed into an undirected walkability graph
//! - Continuous movement between cell centers, no diagonals
//! - Pursuers driven by a chase/scatter/frightened/eaten state machine
//!   over multi-source BFS
//!
//! Identical layouts, tunables and key scripts always produce identical
//! runs; there is no randomness anywhere in the simulation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          Board (per-tick)           │
//! ├──────────────────┬──────────────────┤
//! │  Player          │  Pursuers        │
//! ├──────────────────┴──────────────────┤
//! │  Movement  ·  BFS  ·  Maze graph    │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;

pub use config::{Config, PlayerTuning, PursuerTuning, Scoring};
pub use error::{ConfigError, MazeError};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Direction, Graph, KeyState, Maze, Mode, Mover, PelletKind, Player, Pursuer,
    PursuerKind, Snapshot, Strategy, Vec2, Vertex, shortest_paths,
};
