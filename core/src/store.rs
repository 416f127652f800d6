use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::convert::Infallible;
use core::fmt;

use crate::*;

/// Storage key of the board size setting.
pub const SIZE_KEY: &str = "groupgame_size";

/// Flat string key-value store the game persists into, e.g. the browser's local storage.
pub trait KeyValueStore {
    type Error: fmt::Debug;

    fn get(&self, key: &str) -> core::result::Result<Option<String>, Self::Error>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), Self::Error>;
    fn remove(&mut self, key: &str) -> core::result::Result<(), Self::Error>;
}

/// In-memory store, for tests and hosts without durable storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> core::result::Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> core::result::Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}

impl GameConfig {
    /// Reads the board size setting, falling back to the default size when it is missing or unusable.
    pub fn from_settings<S: KeyValueStore>(store: &S) -> Self {
        let size = match store.get(SIZE_KEY) {
            Ok(Some(value)) => parse_leading_size(&value),
            Ok(None) => None,
            Err(err) => {
                log::warn!("Could not read board size setting: {:?}", err);
                None
            }
        };
        size.and_then(|size| Self::square(size).ok())
            .unwrap_or_default()
    }

    /// Persists the board size setting read by [`GameConfig::from_settings`].
    pub fn save_size<S: KeyValueStore>(store: &mut S, size: Coord) {
        if let Err(err) = store.set(SIZE_KEY, &size.to_string()) {
            log::warn!("Could not save board size setting: {:?}", err);
        }
    }
}

/// Reads the leading digits of a stored setting, so `"7px"` and `"7.0"` both mean 7.
fn parse_leading_size(value: &str) -> Option<Coord> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
