//! Pursuer entities: the mode state machine and targeting strategies.
//!
//! A pursuer commits to a move only at cell centers. Legal moves are
//! the graph neighbors of the current cell minus the reverse of the
//! last committed direction; reversing is allowed only when nothing
//! else is. Every tie among equally good moves resolves to the first
//! candidate in the graph's ascending neighbor order.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::game::graph::{Graph, Vertex};
use crate::game::movement::{Direction, Mover, Vec2};
use crate::game::search::shortest_paths;

/// Pursuer identity. Each identity is bound to one targeting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuerKind {
    /// Chases the player head-on.
    Blinky,
    /// Follows the shortest graph path to the player.
    Pinky,
    /// Routes toward a cell ahead of the player's facing.
    Inky,
    /// Chases from afar, retreats home when close.
    Clyde,
}

impl PursuerKind {
    /// The targeting strategy bound to this identity.
    #[must_use]
    pub const fn strategy(self) -> Strategy {
        match self {
            PursuerKind::Blinky => Strategy::Direct,
            PursuerKind::Pinky => Strategy::Shortest,
            PursuerKind::Inky => Strategy::Flank,
            PursuerKind::Clyde => Strategy::Coward,
        }
    }
}

/// How a pursuer picks its target cell while chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Neighbor closest to the player by straight-line distance.
    Direct,
    /// First step of the shortest graph path to the player's cell.
    Shortest,
    /// Shortest graph path to the cell two steps ahead of the player's
    /// facing, falling back to the player's cell.
    Flank,
    /// Shortest graph path to the player while far away; to the home
    /// corner once the graph distance drops below the coward radius.
    Coward,
}

/// Behavioral phase of a pursuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Actively pursuing the player.
    Chase,
    /// Heading for the home corner.
    Scatter,
    /// Fleeing the player; can be eaten.
    Frightened,
    /// Returning to the spawn cell after being eaten.
    Eaten,
}

/// A single pursuer.
#[derive(Debug, Clone, Copy)]
pub struct Pursuer {
    /// Identity, which fixes the chase strategy.
    pub kind: PursuerKind,
    /// Movement state.
    pub mover: Mover,
    mode: Mode,
    mode_timer: f32,
    last_direction: Option<Direction>,
    retreating: bool,
    spawn: Vertex,
    home: Vertex,
}

impl Pursuer {
    /// Create a pursuer at rest on its spawn cell, starting in scatter.
    #[must_use]
    pub fn new(kind: PursuerKind, spawn: Vertex, home: Vertex, config: &Config) -> Self {
        Self {
            kind,
            mover: Mover::new(spawn, config.pursuer.speed, config.player.anim_frame_secs),
            mode: Mode::Scatter,
            mode_timer: config.pursuer.scatter_secs,
            last_direction: None,
            retreating: false,
            spawn,
            home,
        }
    }

    /// Current behavioral mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The cell this pursuer spawned on and returns to when eaten.
    #[must_use]
    pub const fn spawn(&self) -> Vertex {
        self.spawn
    }

    /// Enter frightened mode for the given duration. Eaten pursuers are
    /// already out of play and ignore the trigger.
    pub fn frighten(&mut self, secs: f32) {
        if self.mode != Mode::Eaten {
            self.set_mode(Mode::Frightened, secs);
        }
    }

    /// Mark this pursuer as eaten; it heads back to its spawn cell.
    pub fn mark_eaten(&mut self) {
        self.set_mode(Mode::Eaten, 0.0);
    }

    fn set_mode(&mut self, mode: Mode, timer: f32) {
        if self.mode != mode {
            debug!("{:?} enters {:?}", self.kind, mode);
        }
        self.mode = mode;
        self.mode_timer = timer;
    }

    /// BFS seed for this pursuer's current state: the single current
    /// cell when aligned, otherwise the departure and arrival cells
    /// weighted `1 - f` and `f` by fractional transit progress `f`.
    #[must_use]
    pub fn search_sources(&self) -> (Vec<Vertex>, Vec<f32>) {
        let Some(direction) = self.mover.direction else {
            return (vec![self.mover.current_vertex()], vec![0.0]);
        };

        let arrival = Vertex::from_position(self.mover.target);
        let departure = Vertex::from_position(self.mover.target - direction.delta());
        let remaining = (self.mover.target - self.mover.position).length();
        let progress = 1.0 - remaining;
        (vec![departure, arrival], vec![1.0 - progress, progress])
    }

    /// Recompute the target cell for this tick.
    ///
    /// Mid-transit the pursuer only refreshes its travel direction (and
    /// the coward strategy its distance estimate, using the weighted
    /// transit sources). Aligned, it commits to one legal neighbor
    /// according to its mode and strategy.
    pub fn update_target(
        &mut self,
        graph: &Graph,
        player_pos: Vec2,
        player_facing: Option<Direction>,
        config: &Config,
    ) {
        let player_vertex = Vertex::from_position(player_pos);

        // Resolve an arrival first so a decision can be made in the
        // same tick the cell center is reached.
        if !self.mover.is_aligned() {
            self.mover.update_direction();
            self.commit_direction();
        }

        if self.mode == Mode::Eaten
            && self.mover.is_aligned()
            && self.mover.current_vertex() == self.spawn
        {
            self.set_mode(Mode::Chase, config.pursuer.chase_secs);
        }

        if self.kind.strategy() == Strategy::Coward && self.mode == Mode::Chase {
            let (sources, offsets) = self.search_sources();
            let result = shortest_paths(graph, &sources, Some(&offsets), player_vertex);
            self.retreating = result
                .distance(player_vertex)
                .is_some_and(|d| d < config.pursuer.coward_radius);
        }

        if !self.mover.is_aligned() {
            return;
        }

        let current = self.mover.current_vertex();
        let candidates = self.legal_candidates(graph, current);
        if candidates.is_empty() {
            // Isolated cell: hold position.
            return;
        }

        let choice = match self.mode {
            Mode::Frightened => flee_choice(&candidates, player_pos),
            Mode::Eaten => self.route_choice(graph, &candidates, self.spawn),
            Mode::Scatter => self.route_choice(graph, &candidates, self.home),
            Mode::Chase => match self.kind.strategy() {
                Strategy::Direct => nearest_choice(&candidates, player_pos),
                Strategy::Shortest => self.route_choice(graph, &candidates, player_vertex),
                Strategy::Flank => {
                    let goal = flank_goal(graph, player_vertex, player_facing);
                    self.route_choice(graph, &candidates, goal)
                }
                Strategy::Coward => {
                    let goal = if self.retreating { self.home } else { player_vertex };
                    self.route_choice(graph, &candidates, goal)
                }
            },
        };

        // Candidates come from the adjacency set, so the edge exists.
        let _ = self.mover.try_set_target(graph, choice);
        self.commit_direction();
    }

    /// Advance movement and the mode countdown by one tick.
    pub fn step(&mut self, delta_time: f32, config: &Config) {
        self.mover.advance(delta_time);

        self.mode_timer -= delta_time;
        if self.mode_timer < 0.0 {
            match self.mode {
                Mode::Chase => self.set_mode(Mode::Scatter, config.pursuer.scatter_secs),
                Mode::Scatter | Mode::Frightened => {
                    self.set_mode(Mode::Chase, config.pursuer.chase_secs);
                }
                // Eaten ends on reaching the spawn cell, not on a timer.
                Mode::Eaten => self.mode_timer = 0.0,
            }
        }
    }

    /// Graph neighbors of `current` minus the reverse of the last
    /// committed direction. The reverse becomes legal again when it is
    /// the only way out.
    fn legal_candidates(&self, graph: &Graph, current: Vertex) -> Vec<Vertex> {
        let banned = self.last_direction.map(Direction::reverse);
        let mut all = Vec::new();
        let mut legal = Vec::new();

        for neighbor in graph.neighbors(current) {
            if neighbor == current {
                continue;
            }
            all.push(neighbor);
            if banned.is_none() || current.direction_to(neighbor) != banned {
                legal.push(neighbor);
            }
        }

        if legal.is_empty() { all } else { legal }
    }

    /// First step of the shortest path from the current cell toward
    /// `goal`, constrained to the legal candidates. Falls back to the
    /// candidate nearest the goal by straight line when the goal is
    /// unreachable or the path starts with an illegal move.
    fn route_choice(&self, graph: &Graph, candidates: &[Vertex], goal: Vertex) -> Vertex {
        let (sources, offsets) = self.search_sources();
        let result = shortest_paths(graph, &sources, Some(&offsets), goal);

        if let Some(path) = result.path_to(goal) {
            if let Some(&step) = path.get(1) {
                if candidates.contains(&step) {
                    return step;
                }
            }
        }

        nearest_choice(candidates, goal.to_position())
    }

    fn commit_direction(&mut self) {
        if let Some(direction) = self.mover.direction {
            self.last_direction = Some(direction);
        }
    }
}

/// The cell two steps ahead of the player's facing, when it is part of
/// the graph; otherwise the player's own cell.
fn flank_goal(graph: &Graph, player_vertex: Vertex, facing: Option<Direction>) -> Vertex {
    let Some(facing) = facing else {
        return player_vertex;
    };
    let ahead = player_vertex.neighbor(facing).neighbor(facing);
    if graph.contains_vertex(ahead) {
        ahead
    } else {
        player_vertex
    }
}

/// Candidate minimizing straight-line squared distance to `point`.
/// First best wins, so ties fall to the smallest vertex.
fn nearest_choice(candidates: &[Vertex], point: Vec2) -> Vertex {
    let mut best = candidates[0];
    let mut best_dist = (best.to_position() - point).length_squared();
    for &candidate in &candidates[1..] {
        let dist = (candidate.to_position() - point).length_squared();
        if dist < best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}

/// Candidate maximizing straight-line squared distance from `point`.
/// The deterministic frightened behavior: flee, no dice involved.
fn flee_choice(candidates: &[Vertex], point: Vec2) -> Vertex {
    let mut best = candidates[0];
    let mut best_dist = (best.to_position() - point).length_squared();
    for &candidate in &candidates[1..] {
        let dist = (candidate.to_position() - point).length_squared();
        if dist > best_dist {
            best = candidate;
            best_dist = dist;
        }
    }
    best
}
