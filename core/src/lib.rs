#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod board;
mod catalog;
mod engine;
mod error;
mod generator;
mod snapshot;
mod store;
mod tile;
mod types;

/// Board shape of one game session.
///
/// Serialized with the camel-case field names of the saved-game format, where it doubles as the fingerprint that
/// ties a snapshot to the configuration it was made for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub num_groups: Coord,
    pub items_per_group: Coord,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord = 5;

    pub const fn new_unchecked(num_groups: Coord, items_per_group: Coord) -> Self {
        Self {
            num_groups,
            items_per_group,
        }
    }

    pub fn new(num_groups: Coord, items_per_group: Coord) -> Result<Self> {
        if num_groups == 0 || items_per_group == 0 {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::new_unchecked(num_groups, items_per_group))
    }

    /// Boards are square for now: as many groups as items per group.
    pub fn square(size: Coord) -> Result<Self> {
        Self::new(size, size)
    }

    /// Grid dimensions as `(rows, cols)`.
    pub const fn dim(&self) -> Coord2 {
        (self.num_groups, self.items_per_group)
    }

    pub const fn board_size(&self) -> CellCount {
        mult(self.num_groups, self.items_per_group)
    }

    /// Successful merges needed to consolidate every group.
    pub const fn win_score(&self) -> CellCount {
        mult(self.num_groups, self.items_per_group.saturating_sub(1))
    }

    pub const fn contains(&self, (row, col): Coord2) -> bool {
        row < self.num_groups && col < self.items_per_group
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Categories matched, `removed` was folded into `survivor`.
    Merged {
        survivor: Coord2,
        removed: Coord2,
        finished: bool,
    },
    /// The merge that consolidated the last group.
    Won { survivor: Coord2, removed: Coord2 },
    /// Categories differ, nothing but the mistake counter changed.
    Mismatch { first: Coord2, second: Coord2 },
}

impl MergeOutcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Merged { .. } | Self::Won { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored,
    Selected(Coord2),
    Deselected(Coord2),
    Merge(MergeOutcome),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            Selected(_) => true,
            Deselected(_) => true,
            Merge(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// No usable snapshot, a new board was dealt.
    Fresh,
    Restored,
    /// Dealt a board that is complete from the start, as with single item groups.
    FreshWon,
    /// Restored a game that was already won, the celebration should be shown again.
    RestoredWon,
}

impl StartOutcome {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::FreshWon | Self::RestoredWon)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed,
}
