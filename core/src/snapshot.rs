use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Storage key of the saved game.
pub const SNAPSHOT_KEY: &str = "groupgame";

/// Saved game as written to the key-value store.
///
/// Tiles are keyed by their origin as `"<row>_<col>"`. Cells that have no entry were merged away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: CellCount,
    pub mistakes: u32,
    #[serde(default)]
    pub config: Option<GameConfig>,
    pub board: BTreeMap<String, TileRecord>,
}

/// Persisted attributes of one tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub category: String,
    /// Stored as a JSON-encoded array inside the document.
    #[serde(with = "cluster_json")]
    pub cluster: Vec<String>,
    /// Written for older readers, the label is derived from the cluster on load.
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub background: String,
}

impl TileRecord {
    pub fn from_tile(tile: &Tile) -> Self {
        let display = tile.display();
        Self {
            category: tile.category().to_string(),
            cluster: tile.cluster().to_vec(),
            inner_html: display.markup(),
            title: display.tooltip().unwrap_or_default().to_string(),
            disabled: tile.is_disabled(),
            background: tile
                .color()
                .map(|color| color.to_string())
                .unwrap_or_default(),
        }
    }
}

/// State recovered from a valid snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoredGame {
    pub board: Board,
    pub score: CellCount,
    pub mistakes: u32,
}

pub fn origin_key((row, col): Coord2) -> String {
    format!("{row}_{col}")
}

pub fn parse_origin_key(key: &str) -> Option<Coord2> {
    let (row, col) = key.split_once('_')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

impl Snapshot {
    pub fn capture(config: GameConfig, board: &Board, score: CellCount, mistakes: u32) -> Self {
        let board = board
            .tiles()
            .map(|tile| (origin_key(tile.origin()), TileRecord::from_tile(tile)))
            .collect();
        Self {
            score,
            mistakes,
            config: Some(config),
            board,
        }
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deletes the saved game from `store`, logging instead of failing.
    pub fn discard<S: KeyValueStore>(store: &mut S) {
        if let Err(err) = store.remove(SNAPSHOT_KEY) {
            log::warn!("Could not delete saved game: {:?}", err);
        }
    }

    pub fn decode(text: &str) -> core::result::Result<Self, SnapshotError> {
        serde_json::from_str(text).map_err(|err| SnapshotError::Corrupt(err.to_string()))
    }

    /// Rebuilds the board for `active`, or explains why the snapshot has to be thrown away.
    ///
    /// Nothing is applied unless the whole snapshot checks out.
    pub fn restore(self, active: GameConfig) -> core::result::Result<RestoredGame, SnapshotError> {
        if self.config != Some(active) {
            return Err(SnapshotError::ConfigMismatch {
                saved: self.config,
                active,
            });
        }

        let corrupt = |reason: String| Err(SnapshotError::Corrupt(reason));
        if self.score > active.win_score() {
            return corrupt(format!(
                "score {} exceeds win score {}",
                self.score,
                active.win_score()
            ));
        }

        let items_per_group = usize::from(active.items_per_group);
        let mut board = Board::empty(active);
        for (key, record) in self.board {
            let Some(origin) = parse_origin_key(&key).filter(|&origin| active.contains(origin))
            else {
                return corrupt(format!("invalid tile key {key:?}"));
            };
            if board.tile_at(origin).is_some() {
                return corrupt(format!("duplicate tile key {key:?}"));
            }

            let len = record.cluster.len();
            if len == 0 || len > items_per_group {
                return corrupt(format!("tile {key} has {len} items"));
            }
            if record.disabled != (len == items_per_group) {
                return corrupt(format!("tile {key} disabled flag disagrees with its items"));
            }

            let color = restore_color(&record);

            let tile = Tile::restore(
                origin,
                record.category,
                record.cluster,
                record.disabled,
                color,
            );
            if let Err(err) = board.bind(tile) {
                return corrupt(format!("tile {key}: {err}"));
            }
        }

        let expected = active.board_size() - self.score;
        if board.remaining() != expected {
            return corrupt(format!(
                "{} tiles left but score {} leaves {}",
                board.remaining(),
                self.score,
                expected
            ));
        }

        Ok(RestoredGame {
            board,
            score: self.score,
            mistakes: self.mistakes,
        })
    }
}

/// Color of a saved tile. Backgrounds in another CSS notation are derived again from the category.
fn restore_color(record: &TileRecord) -> Option<CategoryColor> {
    if record.background.is_empty() {
        return None;
    }
    match record.background.parse::<CategoryColor>() {
        Ok(color) => Some(color),
        Err(err) => {
            log::debug!("{}, using the color of {:?}", err, record.category);
            record
                .disabled
                .then(|| CategoryColor::from_category(&record.category))
        }
    }
}

mod cluster_json {
    use alloc::string::String;
    use alloc::vec::Vec;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cluster: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = serde_json::to_string(cluster).map_err(S::Error::custom)?;
        serializer.serialize_str(&encoded)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        serde_json::from_str(&encoded).map_err(D::Error::custom)
    }
}
