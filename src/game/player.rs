//! The player-controlled agent.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::game::graph::{Graph, Vertex};
use crate::game::movement::{Direction, Mover};

/// Directional keys held down during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
}

impl KeyState {
    /// No keys held.
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// A state with exactly one key held.
    #[must_use]
    pub const fn only(direction: Direction) -> Self {
        let mut keys = Self::NONE;
        match direction {
            Direction::Up => keys.up = true,
            Direction::Down => keys.down = true,
            Direction::Left => keys.left = true,
            Direction::Right => keys.right = true,
        }
        keys
    }

    /// The direction this key state requests. When several keys are
    /// held at once the priority is fixed: left, right, up, down.
    #[must_use]
    pub const fn requested(self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// The player agent: movement state plus score, lives and the
/// invincibility countdown.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Movement state.
    pub mover: Mover,
    facing: Option<Direction>,
    lives: u32,
    score: u32,
    invincible_timer: f32,
    spawn: Vertex,
}

impl Player {
    /// Create the player at rest on its spawn cell, with the starting
    /// invincibility window already running.
    #[must_use]
    pub fn new(spawn: Vertex, config: &Config) -> Self {
        Self {
            mover: Mover::new(spawn, config.player.speed, config.player.anim_frame_secs),
            facing: None,
            lives: config.player.lives,
            score: 0,
            invincible_timer: config.player.invincible_secs,
            spawn,
        }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Last direction the player asked for, accepted or not. Drives
    /// sprite orientation and the flanking pursuer's aim.
    #[must_use]
    pub const fn facing(&self) -> Option<Direction> {
        self.facing
    }

    /// Whether the invincibility window is still open.
    #[must_use]
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Award points.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Open a fresh invincibility window.
    pub fn grant_invincibility(&mut self, secs: f32) {
        self.invincible_timer = secs;
    }

    /// Translate held keys into movement for this tick.
    ///
    /// Aligned, the player may start a move to any neighboring cell;
    /// walking into a wall is silently rejected. Mid-transit the only
    /// honored request is the exact reverse of the current travel
    /// direction, which swaps departure and arrival without snapping.
    /// The facing updates on every request, accepted or not.
    pub fn apply_input(&mut self, graph: &Graph, keys: KeyState) {
        if !self.mover.is_aligned() {
            self.mover.update_direction();
        }

        let Some(wanted) = keys.requested() else {
            return;
        };
        self.facing = Some(wanted);

        if self.mover.is_aligned() {
            let to = self.mover.current_vertex().neighbor(wanted);
            let _ = self.mover.try_set_target(graph, to);
        } else if self.mover.direction == Some(wanted.reverse()) {
            let departure = Vertex::from_position(self.mover.target - wanted.reverse().delta());
            self.mover.target = departure.to_position();
            self.mover.update_direction();
        }
    }

    /// Advance movement and the invincibility countdown by one tick.
    pub fn step(&mut self, delta_time: f32) {
        self.mover.advance(delta_time);
        self.invincible_timer = (self.invincible_timer - delta_time).max(0.0);
    }

    /// Handle being caught by a pursuer: lose a life, drop the score,
    /// respawn at rest with a fresh invincibility window.
    pub fn caught(&mut self, config: &Config) {
        self.lives = self.lives.saturating_sub(1);
        self.score = 0;
        self.facing = None;
        self.mover.reset_to(self.spawn);
        self.invincible_timer = config.player.invincible_secs;
    }
}
