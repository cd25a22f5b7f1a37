//! Continuous movement between discrete grid cells.
//!
//! Agents glide between cell centers and make decisions only when
//! aligned with one. Alignment is represented by `direction == None`;
//! direction is otherwise always an axis-aligned unit step, so the
//! no-diagonal invariant holds by construction.

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::game::graph::{Graph, Vertex};

/// Squared-length threshold below which an agent counts as arrived at
/// its target cell.
///
/// [`Mover::advance`] clamps each step to the remaining distance, so
/// arrival is exact at any speed and tick rate; the window only has to
/// absorb accumulated floating-point drift.
pub const ALIGN_EPS: f32 = 1e-2;

/// Number of animation frames an agent cycles through.
pub const ANIM_FRAME_COUNT: u8 = 4;

/// Continuous 2D position or offset, in cell units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    /// X component (column axis).
    pub x: f32,
    /// Y component (row axis, growing downward).
    pub y: f32,
}

impl Vec2 {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

/// One of the four axis directions.
///
/// Together with `None` (aligned, standing still) this is the complete
/// direction vocabulary; diagonals cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

impl Direction {
    /// Integer step for this direction, as `(dx, dy)`.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit offset for this direction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn delta(self) -> Vec2 {
        let (dx, dy) = self.step();
        Vec2::new(dx as f32, dy as f32)
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Shared movement state for every agent on the board.
#[derive(Debug, Clone, Copy)]
pub struct Mover {
    /// Current continuous position, in cell units.
    pub position: Vec2,
    /// Grid-aligned position the agent is moving toward.
    pub target: Vec2,
    /// Current travel direction; `None` means aligned and standing
    /// still at a cell center.
    pub direction: Option<Direction>,
    /// Travel speed in cells per second.
    pub speed: f32,
    anim_delay: f32,
    anim_timer: f32,
    frame: u8,
}

impl Mover {
    /// Create a mover at rest on the given spawn cell.
    #[must_use]
    pub fn new(spawn: Vertex, speed: f32, anim_delay: f32) -> Self {
        let position = spawn.to_position();
        Self {
            position,
            target: position,
            direction: None,
            speed,
            anim_delay,
            anim_timer: 0.0,
            frame: 0,
        }
    }

    /// Whether the agent sits at a cell center with no pending move.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.direction.is_none()
    }

    /// The grid cell the agent currently rounds to.
    #[must_use]
    pub fn current_vertex(&self) -> Vertex {
        Vertex::from_position(self.position)
    }

    /// Current animation frame, for the presentation layer.
    #[must_use]
    pub const fn frame(&self) -> u8 {
        self.frame
    }

    /// Pin the position to the exact grid vertex it rounds to,
    /// cancelling accumulated floating-point drift.
    pub fn snap_to_grid(&mut self) {
        self.position = self.current_vertex().to_position();
    }

    /// Re-derive the travel direction from the current target offset.
    ///
    /// Arrival (offset within [`ALIGN_EPS`]) clears the direction and
    /// snaps the position. Otherwise the direction is the sign of the
    /// single nonzero offset component, which is axis-aligned by the
    /// target-legality invariant.
    pub fn update_direction(&mut self) {
        let offset = self.target - self.position;
        if offset.length_squared() < ALIGN_EPS {
            self.direction = None;
            self.snap_to_grid();
            return;
        }

        self.direction = if offset.x < 0.0 {
            Some(Direction::Left)
        } else if offset.x > 0.0 {
            Some(Direction::Right)
        } else if offset.y < 0.0 {
            Some(Direction::Up)
        } else {
            Some(Direction::Down)
        };
    }

    /// Propose a new target cell.
    ///
    /// The proposal is accepted only when the graph has an edge from the
    /// agent's current vertex to `to`; otherwise the agent stays put and
    /// `false` is returned. Walking into a wall is an expected,
    /// non-exceptional outcome.
    pub fn try_set_target(&mut self, graph: &Graph, to: Vertex) -> bool {
        if graph.contains_edge(self.current_vertex(), to) {
            self.target = to.to_position();
            self.update_direction();
            true
        } else {
            false
        }
    }

    /// Advance the position by one tick of elapsed time.
    ///
    /// The step is clamped to the remaining distance, so the mover
    /// lands on the target instead of flying past it when
    /// `speed * delta_time` exceeds one approach. Aligned agents stay
    /// pinned to their cell center until a new legal target is
    /// supplied.
    pub fn advance(&mut self, delta_time: f32) {
        self.anim_timer += delta_time;
        while self.anim_timer >= self.anim_delay && self.anim_delay > 0.0 {
            self.anim_timer -= self.anim_delay;
            self.frame = (self.frame + 1) % ANIM_FRAME_COUNT;
        }

        if let Some(direction) = self.direction {
            let remaining = (self.target - self.position).length();
            let step = (self.speed * delta_time).min(remaining);
            self.position += step * direction.delta();
        } else {
            self.snap_to_grid();
        }
    }

    /// Teleport back to a cell center at rest. Used for respawns; the
    /// agent keeps its speed and animation configuration.
    pub fn reset_to(&mut self, vertex: Vertex) {
        self.position = vertex.to_position();
        self.target = self.position;
        self.direction = None;
    }
}
