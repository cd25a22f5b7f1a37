//! Error types for level and configuration loading.

use std::fmt;
use std::io;

/// Failures while parsing a maze layout.
///
/// All of these are fatal at load time: a level that fails to parse
/// cannot be entered.
#[derive(Debug)]
pub enum MazeError {
    /// The layout contained no rows.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
    },
    /// A character outside the recognized tile set.
    UnknownTile {
        /// The unrecognized character.
        tile: char,
        /// Column of the offending cell.
        x: usize,
        /// Row of the offending cell.
        y: usize,
    },
    /// No player spawn marker in the layout.
    MissingPlayerSpawn,
    /// More than one player spawn marker.
    DuplicatePlayerSpawn {
        /// Column of the second marker.
        x: usize,
        /// Row of the second marker.
        y: usize,
    },
    /// The layout file could not be read.
    Io(io::Error),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::Empty => write!(f, "maze layout is empty"),
            MazeError::RaggedRow { row } => {
                write!(f, "row {row} differs in width from the first row")
            }
            MazeError::UnknownTile { tile, x, y } => {
                write!(f, "unknown tile {tile:?} at ({x}, {y})")
            }
            MazeError::MissingPlayerSpawn => write!(f, "maze has no player spawn marker"),
            MazeError::DuplicatePlayerSpawn { x, y } => {
                write!(f, "duplicate player spawn marker at ({x}, {y})")
            }
            MazeError::Io(e) => write!(f, "failed to read maze layout: {e}"),
        }
    }
}

impl std::error::Error for MazeError {}

impl From<io::Error> for MazeError {
    fn from(e: io::Error) -> Self {
        MazeError::Io(e)
    }
}

/// Failures while building a [`crate::Config`] from sectioned key/value
/// data or validating one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Section name does not match any component.
    UnknownSection(String),
    /// Option name is not recognized within its section.
    UnknownOption {
        /// Section the option appeared in.
        section: String,
        /// The unrecognized option name.
        option: String,
    },
    /// Option value violates a simulation invariant.
    OutOfRange {
        /// Section the option lives in.
        section: String,
        /// The offending option name.
        option: String,
        /// What the value must satisfy.
        requirement: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownSection(section) => {
                write!(f, "unknown config section {section:?}")
            }
            ConfigError::UnknownOption { section, option } => {
                write!(f, "unknown option {option:?} in config section {section:?}")
            }
            ConfigError::OutOfRange {
                section,
                option,
                requirement,
            } => {
                write!(
                    f,
                    "option {option:?} in config section {section:?} must be {requirement}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
