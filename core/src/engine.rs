use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Idle,
    OneSelected(Coord2),
}

impl Selection {
    pub const fn selected(self) -> Option<Coord2> {
        match self {
            Self::Idle => None,
            Self::OneSelected(origin) => Some(origin),
        }
    }
}

/// One game session: configuration, board, counters and the store it saves into.
#[derive(Clone, Debug)]
pub struct GameEngine<S> {
    config: GameConfig,
    board: Board,
    score: CellCount,
    mistakes: u32,
    selection: Selection,
    last_save: Option<SaveStatus>,
    store: S,
}

impl<S: KeyValueStore> GameEngine<S> {
    /// Starts a session, resuming the saved game in `store` when it is still valid for `config`.
    ///
    /// Fails only when `categories` cannot fill a board of this shape.
    pub fn start(
        categories: &Categories,
        config: GameConfig,
        store: S,
        seed: u64,
    ) -> Result<(Self, StartOutcome)> {
        categories.validate(config)?;

        let mut engine = Self::with_board(config, Board::empty(config), store);
        if engine.load_state() {
            let outcome = if engine.is_won() {
                StartOutcome::RestoredWon
            } else {
                StartOutcome::Restored
            };
            return Ok((engine, outcome));
        }

        engine.deal(categories, seed)?;
        let outcome = if engine.is_won() {
            StartOutcome::FreshWon
        } else {
            StartOutcome::Fresh
        };
        Ok((engine, outcome))
    }

    /// Session over a known wordlist, without looking at any saved game.
    pub fn from_wordlist(config: GameConfig, wordlist: &[WordEntry], store: S) -> Result<Self> {
        let board = Board::populate(config, wordlist)?;
        Ok(Self::with_board(config, board, store))
    }

    fn with_board(config: GameConfig, board: Board, store: S) -> Self {
        Self {
            config,
            board,
            score: 0,
            mistakes: 0,
            selection: Selection::Idle,
            last_save: None,
            store,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> CellCount {
        self.score
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_won(&self) -> bool {
        self.score == self.config.win_score()
    }

    /// Result of the most recent save, `None` until the first one.
    pub fn last_save(&self) -> Option<SaveStatus> {
        self.last_save
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Handles a click on the tile at `origin`.
    pub fn select(&mut self, origin: Coord2) -> SelectOutcome {
        match self.board.tile_at(origin) {
            Some(tile) if !tile.is_disabled() => {}
            _ => {
                log::trace!("ignoring selection of {:?}", origin);
                return SelectOutcome::Ignored;
            }
        }

        match self.selection {
            Selection::Idle => {
                log::debug!("select {:?}", origin);
                self.selection = Selection::OneSelected(origin);
                SelectOutcome::Selected(origin)
            }
            Selection::OneSelected(held) if held == origin => {
                log::debug!("deselect {:?}", origin);
                self.selection = Selection::Idle;
                SelectOutcome::Deselected(origin)
            }
            Selection::OneSelected(held) => self
                .attempt_merge(held, origin)
                .map_or(SelectOutcome::Ignored, SelectOutcome::Merge),
        }
    }

    /// Drops the held tile, if any.
    pub fn deselect(&mut self) -> bool {
        let held = self.selection.selected();
        self.selection = Selection::Idle;
        held.is_some()
    }

    /// Merges `first` into `second` when they share a category, then saves.
    ///
    /// The tile picked second survives so the player decides where groups collect.
    fn attempt_merge(&mut self, first: Coord2, second: Coord2) -> Option<MergeOutcome> {
        self.selection = Selection::Idle;

        let same_category = match (self.board.tile_at(first), self.board.tile_at(second)) {
            (Some(a), Some(b)) => a.category() == b.category(),
            _ => {
                log::warn!("merge of {:?} into {:?} without both tiles", first, second);
                return None;
            }
        };

        let outcome = if same_category {
            let removed = self.board.remove(first)?;
            let items_per_group = self.config.items_per_group;
            let finished = self
                .board
                .tile_at_mut(second)?
                .absorb(removed.into_cluster(), items_per_group);
            self.score += 1;
            log::debug!(
                "merged {:?} into {:?}, score {}/{}",
                first,
                second,
                self.score,
                self.config.win_score()
            );

            if self.is_won() {
                log::info!("all groups found with {} mistakes", self.mistakes);
                MergeOutcome::Won {
                    survivor: second,
                    removed: first,
                }
            } else {
                MergeOutcome::Merged {
                    survivor: second,
                    removed: first,
                    finished,
                }
            }
        } else {
            self.mistakes = self.mistakes.saturating_add(1);
            log::debug!("mismatch {:?} and {:?}, {} mistakes", first, second, self.mistakes);
            MergeOutcome::Mismatch { first, second }
        };

        self.save_state();
        Some(outcome)
    }

    /// Writes the current game to the store, replacing any earlier save.
    ///
    /// A failed write is logged and the game carries on without a durable copy.
    pub fn save_state(&mut self) -> SaveStatus {
        let snapshot = Snapshot::capture(self.config, &self.board, self.score, self.mistakes);
        let status = match snapshot.encode() {
            Ok(encoded) => match self.store.set(SNAPSHOT_KEY, &encoded) {
                Ok(()) => SaveStatus::Saved,
                Err(err) => {
                    log::warn!("Could not save game, continuing without a save: {:?}", err);
                    SaveStatus::Failed
                }
            },
            Err(err) => {
                log::error!("Could not encode game: {}", err);
                SaveStatus::Failed
            }
        };
        self.last_save = Some(status);
        status
    }

    /// Replaces the session state with the saved game, returns whether there was a usable one.
    ///
    /// Unusable saves are deleted from the store.
    pub fn load_state(&mut self) -> bool {
        let text = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return false,
            Err(err) => {
                log::warn!("Could not read saved game: {:?}", err);
                return false;
            }
        };

        match Snapshot::decode(&text).and_then(|snapshot| snapshot.restore(self.config)) {
            Ok(RestoredGame {
                board,
                score,
                mistakes,
            }) => {
                self.board = board;
                self.score = score;
                self.mistakes = mistakes;
                self.selection = Selection::Idle;
                log::debug!("restored game with score {}", score);
                true
            }
            Err(err @ SnapshotError::ConfigMismatch { .. }) => {
                log::info!("{}, starting fresh game", err);
                self.clear_state();
                false
            }
            Err(err) => {
                log::error!("Failed to load state: {}", err);
                self.clear_state();
                false
            }
        }
    }

    /// Deletes the saved game.
    pub fn clear_state(&mut self) {
        Snapshot::discard(&mut self.store);
    }

    /// Throws the current game away and deals a new board of the same shape.
    pub fn new_game(&mut self, categories: &Categories, seed: u64) -> Result<()> {
        log::info!("new game");
        self.clear_state();
        self.deal(categories, seed)
    }

    /// Switches to a square board of `size`, dealing a new game. Returns whether anything changed.
    ///
    /// The current game is left alone when the new size cannot be dealt.
    pub fn change_size(&mut self, categories: &Categories, size: Coord, seed: u64) -> Result<bool> {
        let config = GameConfig::square(size)?;
        if config == self.config {
            return Ok(false);
        }
        categories.validate(config)?;

        log::info!("changing board size to {}", size);
        self.clear_state();
        GameConfig::save_size(&mut self.store, size);
        self.config = config;
        self.deal(categories, seed)?;
        Ok(true)
    }

    fn deal(&mut self, categories: &Categories, seed: u64) -> Result<()> {
        let wordlist = RandomWordlistGenerator::new(seed).generate(categories, self.config)?;
        self.board = Board::populate(self.config, &wordlist)?;
        self.score = 0;
        self.mistakes = 0;
        self.selection = Selection::Idle;
        Ok(())
    }
}
