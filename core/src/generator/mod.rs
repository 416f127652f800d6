use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// One board cell's worth of content: an item and the category it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub item: String,
    pub category: String,
}

impl WordEntry {
    pub fn new(item: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            category: category.into(),
        }
    }
}

/// Flat list of entries, one per board cell, in placement order.
pub type Wordlist = Vec<WordEntry>;

pub trait WordlistGenerator {
    fn generate(self, categories: &Categories, config: GameConfig) -> Result<Wordlist>;
}
