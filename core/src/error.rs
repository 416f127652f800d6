use alloc::string::String;
use thiserror::Error;

use crate::{Coord, GameConfig};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Invalid configuration, groups and items per group must be at least 1")]
    InvalidConfig,
    #[error(
        "Need {required} categories with at least {min_items} items each. Only {qualifying} qualify."
    )]
    NotEnoughCategories {
        required: Coord,
        min_items: Coord,
        qualifying: usize,
    },
    #[error("Wordlist has {actual} entries but the board has {expected} cells")]
    WordlistSize { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Reasons a persisted snapshot is discarded instead of restored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Saved game is corrupt: {0}")]
    Corrupt(String),
    #[error("Saved game was made for {saved:?}, active configuration is {active:?}")]
    ConfigMismatch {
        saved: Option<GameConfig>,
        active: GameConfig,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color {0:?}, expected hsl(h, s%, l%)")]
pub struct ParseColorError(pub String);
