//! Numeric tunables for the simulation.
//!
//! The core never parses a config file itself. It accepts either a
//! deserialized [`Config`] (the CLI feeds it JSON) or already-parsed
//! sectioned key/value data via [`Config::from_sections`], with section
//! names mirroring the components they tune.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the player agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Travel speed, cells per second.
    pub speed: f32,
    /// Starting lives.
    pub lives: u32,
    /// Invincibility window after a power pellet or a catch, seconds.
    pub invincible_secs: f32,
    /// Collision circle radius, in cell units.
    pub collision_radius: f32,
    /// Delay between animation frames, seconds.
    pub anim_frame_secs: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            lives: 3,
            invincible_secs: 3.0,
            collision_radius: 0.4,
            anim_frame_secs: 0.1,
        }
    }
}

/// Tunables shared by all pursuers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuerTuning {
    /// Travel speed, cells per second.
    pub speed: f32,
    /// Duration of the chase phase, seconds.
    pub chase_secs: f32,
    /// Duration of the scatter phase, seconds.
    pub scatter_secs: f32,
    /// Duration of the frightened phase, seconds.
    pub frightened_secs: f32,
    /// Graph distance below which the coward strategy retreats home.
    pub coward_radius: f32,
}

impl Default for PursuerTuning {
    fn default() -> Self {
        Self {
            speed: 3.5,
            chase_secs: 20.0,
            scatter_secs: 7.0,
            frightened_secs: 6.0,
            coward_radius: 8.0,
        }
    }
}

/// Point awards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Points for a normal pellet.
    pub pellet: u32,
    /// Points for a power pellet.
    pub power: u32,
    /// Points for eating a frightened pursuer.
    pub eaten_pursuer: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            pellet: 10,
            power: 50,
            eaten_pursuer: 200,
        }
    }
}

/// Complete tunable set consumed by [`crate::Board`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Player tunables.
    pub player: PlayerTuning,
    /// Pursuer tunables.
    pub pursuer: PursuerTuning,
    /// Point awards.
    pub scoring: Scoring,
}

fn out_of_range(section: &str, option: &str, requirement: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        section: section.to_owned(),
        option: option.to_owned(),
        requirement,
    }
}

impl Config {
    /// Build a config from `section -> option -> value` maps, starting
    /// from defaults and applying every override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a section or option name that does
    /// not correspond to any tunable.
    pub fn from_sections(
        sections: &HashMap<String, HashMap<String, f64>>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (section, options) in sections {
            for (option, &value) in options {
                config.apply(section, option, value)?;
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the simulation depends on: positive finite
    /// speeds and collision radius, at least one life, non-negative
    /// timers. Zero-duration phases are degenerate but legal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first offending
    /// option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(value: f32, section: &str, option: &str) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(out_of_range(section, option, "a positive finite number"))
            }
        }
        fn non_negative(value: f32, section: &str, option: &str) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(out_of_range(section, option, "a non-negative finite number"))
            }
        }

        positive(self.player.speed, "player", "speed")?;
        positive(self.player.collision_radius, "player", "collision_radius")?;
        non_negative(self.player.invincible_secs, "player", "invincible_secs")?;
        non_negative(self.player.anim_frame_secs, "player", "anim_frame_secs")?;
        if self.player.lives == 0 {
            return Err(out_of_range("player", "lives", "at least 1"));
        }

        positive(self.pursuer.speed, "pursuer", "speed")?;
        non_negative(self.pursuer.chase_secs, "pursuer", "chase_secs")?;
        non_negative(self.pursuer.scatter_secs, "pursuer", "scatter_secs")?;
        non_negative(self.pursuer.frightened_secs, "pursuer", "frightened_secs")?;
        non_negative(self.pursuer.coward_radius, "pursuer", "coward_radius")?;

        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply(&mut self, section: &str, option: &str, value: f64) -> Result<(), ConfigError> {
        let unknown_option = || ConfigError::UnknownOption {
            section: section.to_owned(),
            option: option.to_owned(),
        };

        match section {
            "player" => match option {
                "speed" => self.player.speed = value as f32,
                "lives" => self.player.lives = value as u32,
                "invincible_secs" => self.player.invincible_secs = value as f32,
                "collision_radius" => self.player.collision_radius = value as f32,
                "anim_frame_secs" => self.player.anim_frame_secs = value as f32,
                _ => return Err(unknown_option()),
            },
            "pursuer" => match option {
                "speed" => self.pursuer.speed = value as f32,
                "chase_secs" => self.pursuer.chase_secs = value as f32,
                "scatter_secs" => self.pursuer.scatter_secs = value as f32,
                "frightened_secs" => self.pursuer.frightened_secs = value as f32,
                "coward_radius" => self.pursuer.coward_radius = value as f32,
                _ => return Err(unknown_option()),
            },
            "scoring" => match option {
                "pellet" => self.scoring.pellet = value as u32,
                "power" => self.scoring.power = value as u32,
                "eaten_pursuer" => self.scoring.eaten_pursuer = value as u32,
                _ => return Err(unknown_option()),
            },
            _ => return Err(ConfigError::UnknownSection(section.to_owned())),
        }
        Ok(())
    }
}
