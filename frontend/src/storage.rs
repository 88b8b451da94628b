use common::store::{KeyValueStorage, StoreError};
use wasm_bindgen::JsValue;

/// `window.localStorage`. When the browser refuses access (private mode,
/// disabled storage) reads return nothing and writes fail.
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage is unavailable; saved places will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(js_error),
            None => Ok(None),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(js_error),
            None => Err(StoreError::Storage("localStorage is unavailable".to_string())),
        }
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Storage(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
