use ndarray::Array2;

use crate::*;

/// Authoritative tile table, indexed by origin coordinates.
///
/// Every cell starts out holding one tile. A cell whose tile was merged away stays empty for the rest of the game,
/// so origins are never reused and rows shrink as the game progresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: Array2<Option<Tile>>,
    dim: Coord2,
    remaining: CellCount,
}

impl Board {
    /// Grid with the shape of `config` and no tiles bound yet.
    pub fn empty(config: GameConfig) -> Self {
        let dim = config.dim();
        Self {
            tiles: Array2::default(dim.to_nd_index()),
            dim,
            remaining: 0,
        }
    }

    /// Places `wordlist` row by row onto a new board.
    pub fn populate(config: GameConfig, wordlist: &[WordEntry]) -> Result<Self> {
        let expected = usize::from(config.board_size());
        if wordlist.len() != expected {
            return Err(GameError::WordlistSize {
                expected,
                actual: wordlist.len(),
            });
        }

        let mut board = Self::empty(config);
        let (rows, cols) = config.dim();
        let origins = (0..rows).flat_map(|row| (0..cols).map(move |col| (row, col)));
        for (origin, entry) in origins.zip(wordlist) {
            board.bind(Tile::new(origin, entry, config.items_per_group))?;
        }
        Ok(board)
    }

    /// Puts `tile` into the cell of its origin, replacing whatever was there.
    pub fn bind(&mut self, tile: Tile) -> Result<()> {
        let slot = self
            .tiles
            .get_mut(tile.origin().to_nd_index())
            .ok_or(GameError::InvalidCoords)?;
        if slot.replace(tile).is_none() {
            self.remaining += 1;
        }
        Ok(())
    }

    /// Takes the tile out of its cell for good.
    pub fn remove(&mut self, origin: Coord2) -> Option<Tile> {
        let tile = self.tiles.get_mut(origin.to_nd_index())?.take()?;
        self.remaining -= 1;
        Some(tile)
    }

    pub fn dim(&self) -> Coord2 {
        self.dim
    }

    /// Number of tiles still on the board.
    pub fn remaining(&self) -> CellCount {
        self.remaining
    }

    pub fn tile_at(&self, origin: Coord2) -> Option<&Tile> {
        self.tiles.get(origin.to_nd_index()).and_then(Option::as_ref)
    }

    pub(crate) fn tile_at_mut(&mut self, origin: Coord2) -> Option<&mut Tile> {
        self.tiles
            .get_mut(origin.to_nd_index())
            .and_then(Option::as_mut)
    }

    /// Remaining tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter_map(Option::as_ref)
    }

    /// Remaining tiles grouped by their origin row, the shape a renderer lays out.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Tile>> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| row.into_iter().filter_map(Option::as_ref))
    }
}
