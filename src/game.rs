//! Core simulation: maze graph, pathfinding, agents and the board
//! that ties them together.

pub mod board;
pub mod graph;
pub mod maze;
pub mod movement;
pub mod player;
pub mod pursuer;
pub mod search;

pub use board::{AgentView, Board, PursuerView, Snapshot};
pub use graph::{Graph, Vertex};
pub use maze::{Maze, PelletKind};
pub use movement::{ALIGN_EPS, ANIM_FRAME_COUNT, Direction, Mover, Vec2};
pub use player::{KeyState, Player};
pub use pursuer::{Mode, Pursuer, PursuerKind, Strategy};
pub use search::{SearchResult, shortest_paths};
