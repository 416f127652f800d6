use gloo::storage::{LocalStorage, Storage};
use groupgame_core::KeyValueStore;
use wasm_bindgen::JsValue;

/// The browser's local storage, shared by the saved game and the size setting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    type Error = JsValue;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        LocalStorage::raw().get_item(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        LocalStorage::raw().set_item(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        LocalStorage::raw().remove_item(key)
    }
}
