//! Grid graph over walkable maze cells.

use std::collections::{BTreeMap, BTreeSet};

use crate::game::movement::{Direction, Vec2};

/// Integer grid coordinate identifying one maze cell.
///
/// Ordering is lexicographic by `(x, y)`, which is what makes neighbor
/// iteration (and therefore every tie-break built on it) deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl Vertex {
    /// Create a new vertex.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Construct a vertex from a continuous position by rounding both
    /// components to the nearest integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_position(position: Vec2) -> Self {
        Self {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
        }
    }

    /// Convert into a continuous position at the cell center.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_position(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// The vertex one step away in the given direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.step();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Direction of the axis-aligned unit step from `self` to `other`,
    /// or `None` when the cells coincide or are not axis-adjacent.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        match (other.x - self.x, other.y - self.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Undirected graph over grid cells, stored as adjacency sets.
///
/// Adding edge `(a, b)` inserts `b` into `a`'s set and `a` into `b`'s set
/// unless `a == b`. Self-loops are permitted but inert; multi-edges are
/// impossible. Built once per level load and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: BTreeMap<Vertex, BTreeSet<Vertex>>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices with at least one incident edge.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    /// Add an undirected edge between two vertices.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex) {
        self.edges.entry(from).or_default().insert(to);
        if from != to {
            self.edges.entry(to).or_default().insert(from);
        }
    }

    /// Whether the vertex has any incident edge.
    #[must_use]
    pub fn contains_vertex(&self, vertex: Vertex) -> bool {
        self.edges.contains_key(&vertex)
    }

    /// Whether an edge exists between the two vertices.
    #[must_use]
    pub fn contains_edge(&self, from: Vertex, to: Vertex) -> bool {
        self.edges.get(&from).is_some_and(|set| set.contains(&to))
    }

    /// Iterate the neighbors of a vertex in ascending `(x, y)` order.
    ///
    /// The ordering is a documented guarantee: movement strategies break
    /// ties by taking the first best candidate this iterator yields, so
    /// ties always resolve to the lexicographically smallest vertex.
    /// Unknown vertices yield an empty iterator.
    pub fn neighbors(&self, vertex: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.edges.get(&vertex).into_iter().flatten().copied()
    }
}
