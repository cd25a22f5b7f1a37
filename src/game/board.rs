//! Board orchestration: one instance owns the full simulation state
//! and advances it tick by tick.
//!
//! Per-tick order is fixed: pursuers retarget against the player's
//! pre-tick position, the player's input is applied, everyone advances
//! by the elapsed time, then pellets are consumed and collisions
//! resolved.

use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::error::MazeError;
use crate::game::graph::{Graph, Vertex};
use crate::game::maze::{Maze, PelletKind};
use crate::game::movement::{ALIGN_EPS, Direction};
use crate::game::player::{KeyState, Player};
use crate::game::pursuer::{Mode, Pursuer, PursuerKind};

/// The complete game state for one level.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    graph: Graph,
    pellets: Vec<Vec<Option<PelletKind>>>,
    pellets_remaining: usize,
    player: Player,
    pursuers: Vec<Pursuer>,
    config: Config,
}

impl Board {
    /// Build a board from a parsed maze.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(maze: &Maze, config: Config) -> Self {
        let width = maze.width();
        let height = maze.height();
        let far_x = width as i32 - 1;
        let far_y = height as i32 - 1;

        let pursuers = maze
            .pursuer_spawns()
            .iter()
            .map(|&(kind, spawn)| {
                let home = match kind {
                    PursuerKind::Blinky => Vertex::new(far_x, 0),
                    PursuerKind::Pinky => Vertex::new(0, 0),
                    PursuerKind::Inky => Vertex::new(far_x, far_y),
                    PursuerKind::Clyde => Vertex::new(0, far_y),
                };
                Pursuer::new(kind, spawn, home, &config)
            })
            .collect::<Vec<_>>();

        info!(
            "board {}x{}: {} pellets, {} pursuers",
            width,
            height,
            maze.total_pellets(),
            pursuers.len()
        );

        Self {
            width,
            height,
            graph: maze.graph().clone(),
            pellets: maze.pellets().to_vec(),
            pellets_remaining: maze.total_pellets(),
            player: Player::new(maze.player_spawn(), &config),
            pursuers,
            config,
        }
    }

    /// Parse a layout and build a board from it in one call.
    ///
    /// # Errors
    ///
    /// Returns a [`MazeError`] when the layout does not parse.
    pub fn from_text(text: &str, config: Config) -> Result<Self, MazeError> {
        Ok(Self::new(&Maze::parse(text)?, config))
    }

    /// Advance the simulation by one tick. Does nothing once the game
    /// is over.
    pub fn step(&mut self, delta_time: f32, keys: KeyState) {
        if self.is_game_over() {
            return;
        }

        let player_pos = self.player.mover.position;
        let player_facing = self.player.facing();
        for pursuer in &mut self.pursuers {
            pursuer.update_target(&self.graph, player_pos, player_facing, &self.config);
        }

        self.player.apply_input(&self.graph, keys);
        self.player.step(delta_time);
        for pursuer in &mut self.pursuers {
            pursuer.step(delta_time, &self.config);
        }

        self.consume_pellet();
        self.resolve_collisions();
    }

    /// Eat the pellet under the player, if the player is close enough
    /// to a cell center to count as on it.
    #[allow(clippy::cast_sign_loss)]
    fn consume_pellet(&mut self) {
        let vertex = self.player.mover.current_vertex();
        let center_offset = self.player.mover.position - vertex.to_position();
        if center_offset.length_squared() >= ALIGN_EPS {
            return;
        }

        let (x, y) = (vertex.x, vertex.y);
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if y >= self.height || x >= self.width {
            return;
        }

        let Some(kind) = self.pellets[y][x].take() else {
            return;
        };
        self.pellets_remaining -= 1;

        match kind {
            PelletKind::Normal => self.player.add_score(self.config.scoring.pellet),
            PelletKind::Power => {
                self.player.add_score(self.config.scoring.power);
                self.player
                    .grant_invincibility(self.config.player.invincible_secs);
                for pursuer in &mut self.pursuers {
                    pursuer.frighten(self.config.pursuer.frightened_secs);
                }
            }
        }
    }

    /// Resolve player/pursuer overlaps by circle intersection.
    fn resolve_collisions(&mut self) {
        let radius = self.config.player.collision_radius;
        let threshold = (2.0 * radius) * (2.0 * radius);

        for pursuer in &mut self.pursuers {
            if pursuer.mode() == Mode::Eaten {
                continue;
            }
            let gap = pursuer.mover.position - self.player.mover.position;
            if gap.length_squared() >= threshold {
                continue;
            }

            if pursuer.mode() == Mode::Frightened {
                pursuer.mark_eaten();
                self.player.add_score(self.config.scoring.eaten_pursuer);
            } else if !self.player.is_invincible() {
                self.player.caught(&self.config);
                if self.player.lives() == 0 {
                    return;
                }
            }
        }
    }

    /// Whether every pellet has been eaten.
    #[must_use]
    pub const fn has_won(&self) -> bool {
        self.pellets_remaining == 0
    }

    /// Whether the player is out of lives.
    #[must_use]
    pub const fn has_lost(&self) -> bool {
        self.player.lives() == 0
    }

    /// Whether the game ended either way.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.has_won() || self.has_lost()
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

    /// Remaining pellet grid, row-major.
    #[must_use]
    pub fn pellets(&self) -> &[Vec<Option<PelletKind>>] {
        &self.pellets
    }

    /// Pellets not yet eaten.
    #[must_use]
    pub const fn pellets_remaining(&self) -> usize {
        self.pellets_remaining
    }

    /// The player agent.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// All pursuers, in maze scan order.
    #[must_use]
    pub fn pursuers(&self) -> &[Pursuer] {
        &self.pursuers
    }

    /// The active tunables.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Serializable view of the current state, for frontends and logs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.player.score(),
            lives: self.player.lives(),
            pellets_remaining: self.pellets_remaining,
            won: self.has_won(),
            lost: self.has_lost(),
            player: AgentView {
                x: self.player.mover.position.x,
                y: self.player.mover.position.y,
                direction: self.player.mover.direction,
                facing: self.player.facing(),
                frame: self.player.mover.frame(),
                invincible: self.player.is_invincible(),
            },
            pursuers: self
                .pursuers
                .iter()
                .map(|pursuer| PursuerView {
                    kind: pursuer.kind,
                    mode: pursuer.mode(),
                    x: pursuer.mover.position.x,
                    y: pursuer.mover.position.y,
                    direction: pursuer.mover.direction,
                    frame: pursuer.mover.frame(),
                })
                .collect(),
            pellets: self.pellets.clone(),
        }
    }
}

/// Point-in-time view of the whole board.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Current score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Pellets not yet eaten.
    pub pellets_remaining: usize,
    /// True once every pellet is eaten.
    pub won: bool,
    /// True once the player is out of lives.
    pub lost: bool,
    /// Player state.
    pub player: AgentView,
    /// Pursuer states, in maze scan order.
    pub pursuers: Vec<PursuerView>,
    /// Remaining pellet grid, row-major.
    pub pellets: Vec<Vec<Option<PelletKind>>>,
}

/// Player position and status inside a [`Snapshot`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgentView {
    /// Continuous x position, cell units.
    pub x: f32,
    /// Continuous y position, cell units.
    pub y: f32,
    /// Current travel direction, if moving.
    pub direction: Option<Direction>,
    /// Last requested direction, for sprite orientation.
    pub facing: Option<Direction>,
    /// Current animation frame.
    pub frame: u8,
    /// Whether the invincibility window is open.
    pub invincible: bool,
}

/// Pursuer position and status inside a [`Snapshot`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PursuerView {
    /// Identity.
    pub kind: PursuerKind,
    /// Behavioral mode.
    pub mode: Mode,
    /// Continuous x position, cell units.
    pub x: f32,
    /// Continuous y position, cell units.
    pub y: f32,
    /// Current travel direction, if moving. Orients the sprite.
    pub direction: Option<Direction>,
    /// Current animation frame.
    pub frame: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    /// Player alone in a short pellet corridor.
    const CORRIDOR: &str = "#####\n#S..#\n#####";

    fn board(text: &str) -> Board {
        Board::from_text(text, Config::default()).unwrap()
    }

    /// Default config with the invincibility window overridden.
    fn no_mercy_config(invincible_secs: f32) -> Config {
        let mut config = Config::default();
        config.player.invincible_secs = invincible_secs;
        config
    }

    #[test]
    fn test_single_cell_maze_is_won_at_start() {
        let board = board("###\n#S#\n###");
        assert!(board.has_won());
        assert!(!board.has_lost());
        assert!(board.is_game_over());
    }

    #[test]
    fn test_step_after_game_over_is_inert() {
        let mut board = board("###\n#S#\n###");
        let before = board.snapshot();
        board.step(TICK, KeyState::only(Direction::Right));
        let after = board.snapshot();
        assert_eq!(before.score, after.score);
        assert!((before.player.x - after.player.x).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pressing_into_wall_keeps_player_pinned() {
        let mut board = board(CORRIDOR);
        let spawn = board.player().mover.current_vertex();

        for _ in 0..30 {
            board.step(TICK, KeyState::only(Direction::Up));
        }
        assert_eq!(board.player().mover.current_vertex(), spawn);
        assert!(board.player().mover.is_aligned());
        // The sprite still turned toward the wall.
        assert_eq!(board.player().facing(), Some(Direction::Up));
    }

    #[test]
    fn test_walking_the_corridor_wins() {
        let mut board = board(CORRIDOR);
        assert_eq!(board.pellets_remaining(), 2);

        for _ in 0..240 {
            board.step(TICK, KeyState::only(Direction::Right));
            if board.has_won() {
                break;
            }
        }

        assert!(board.has_won());
        assert_eq!(
            board.player().score(),
            2 * board.config().scoring.pellet
        );
    }

    #[test]
    fn test_coarse_tick_rate_still_eats_every_pellet() {
        // 10 ticks/s at default speed is 0.4 cells per tick; the player
        // must still land on every cell center along the way.
        let mut board = board(CORRIDOR);

        for _ in 0..600 {
            board.step(0.1, KeyState::only(Direction::Right));
            if board.has_won() {
                break;
            }
        }

        assert!(board.has_won());
        assert_eq!(
            board.player().score(),
            2 * board.config().scoring.pellet
        );
    }

    #[test]
    fn test_power_pellet_frightens_pursuers() {
        // Power pellet right next to the spawn; pursuer far away.
        let mut board = board("#######\n#SF..B#\n#######");

        for _ in 0..30 {
            board.step(TICK, KeyState::only(Direction::Right));
            if board.pursuers()[0].mode() == Mode::Frightened {
                break;
            }
        }

        assert_eq!(board.pursuers()[0].mode(), Mode::Frightened);
        assert!(board.player().is_invincible());
        assert_eq!(board.player().score(), board.config().scoring.power);
    }

    #[test]
    fn test_catch_costs_a_life_and_the_score() {
        let config = no_mercy_config(0.0);
        let mut board = Board::from_text("#####\n#S.B#\n#####", config).unwrap();

        // Stand still; the pursuer closes in on its own.
        for _ in 0..600 {
            board.step(TICK, KeyState::NONE);
            if board.player().lives() < config.player.lives {
                break;
            }
        }

        assert_eq!(board.player().lives(), config.player.lives - 1);
        assert_eq!(board.player().score(), 0);
        assert_eq!(
            board.player().mover.current_vertex(),
            Vertex::new(1, 1)
        );
    }

    #[test]
    fn test_invincible_player_shrugs_off_contact() {
        let config = no_mercy_config(1_000.0);
        let mut board = Board::from_text("#####\n#S.B#\n#####", config).unwrap();

        for _ in 0..600 {
            board.step(TICK, KeyState::NONE);
        }
        assert_eq!(board.player().lives(), config.player.lives);
    }

    #[test]
    fn test_frightened_pursuer_is_eaten_on_contact() {
        let mut board = board("######\n#SF.B#\n######");

        // Grab the power pellet, then keep walking into the pursuer.
        let mut ate_one = false;
        for _ in 0..600 {
            board.step(TICK, KeyState::only(Direction::Right));
            if board.pursuers()[0].mode() == Mode::Eaten {
                ate_one = true;
                break;
            }
        }

        assert!(ate_one);
        let expected = board.config().scoring.power + board.config().scoring.eaten_pursuer;
        assert!(board.player().score() >= expected);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut board = board("#####\n#S.B#\n#####");
        let snapshot = board.snapshot();

        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.lives, board.config().player.lives);
        assert_eq!(snapshot.pellets_remaining, 1);
        assert!(!snapshot.won);
        assert!(!snapshot.lost);
        assert_eq!(snapshot.pursuers.len(), 1);
        assert_eq!(snapshot.pursuers[0].kind, PursuerKind::Blinky);
        // At rest, both agents report no travel direction.
        assert_eq!(snapshot.pursuers[0].direction, None);

        // Once moving, the pursuer's direction is exposed for the
        // renderer; (2,1) is Blinky's only way out of its corner.
        board.step(TICK, KeyState::NONE);
        let moving = board.snapshot();
        assert_eq!(moving.pursuers[0].direction, Some(Direction::Left));

        let json = serde_json::to_string(&moving).unwrap();
        assert!(json.contains("\"pellets_remaining\":1"));
        assert!(json.contains("\"direction\":\"Left\""));
    }

    #[test]
    fn test_pellet_count_never_desyncs() {
        let mut board = board(CORRIDOR);
        for _ in 0..240 {
            board.step(TICK, KeyState::only(Direction::Right));
            let on_grid: usize = board
                .pellets()
                .iter()
                .flatten()
                .filter(|cell| cell.is_some())
                .count();
            assert_eq!(on_grid, board.pellets_remaining());
        }
    }
}
