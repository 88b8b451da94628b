//! # Saved places
//!
//! An ordered list of [`PlaceRecord`]s mirrored to a key/value storage under
//! a single key, as one JSON array. Insertion order is display order.
//!
//! The store is an explicit object owned by whoever renders the list; its
//! only mutations are [`PlaceStore::append`] and [`PlaceStore::remove_by_id`],
//! and each of them rewrites the whole array.

mod memory;

use log::{debug, warn};
use thiserror::Error;

use crate::model::place::PlaceRecord;

pub use memory::MemoryStorage;

/// Key holding the serialized list.
pub const STORAGE_KEY: &str = "travelSaverPlaces";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("could not serialize saved places: {0}")]
    Serialize(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("a place needs a name before it can be saved")]
    MissingPlaceName,
    #[error("a place with id {0} is already saved")]
    DuplicateId(i64),
}

impl StoreError {
    /// True when `append` refused the record before touching the list.
    pub fn is_refusal(&self) -> bool {
        matches!(self, StoreError::MissingPlaceName | StoreError::DuplicateId(_))
    }
}

/// Synchronous string key/value storage, shaped after the browser's
/// `localStorage`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

pub struct PlaceStore<S> {
    storage: S,
    places: Vec<PlaceRecord>,
}

impl<S: KeyValueStorage> PlaceStore<S> {
    /// Reads the persisted list. Missing, unreadable or corrupted data all
    /// yield an empty store; corruption is logged, never returned.
    pub fn load(storage: S) -> Self {
        let places = match storage.get_item(STORAGE_KEY) {
            Ok(Some(serialized)) => match serde_json::from_str::<Vec<PlaceRecord>>(&serialized) {
                Ok(places) => places,
                Err(e) => {
                    warn!("Error loading saved places, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Saved places could not be read, starting empty: {e}");
                Vec::new()
            }
        };
        debug!("loaded {} saved places", places.len());
        Self { storage, places }
    }

    pub fn places(&self) -> &[PlaceRecord] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn max_id(&self) -> Option<i64> {
        self.places.iter().map(|place| place.id).max()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Adds `record` at the end and persists the whole list.
    ///
    /// If persisting fails the record stays in memory and the error is
    /// returned.
    pub fn append(&mut self, record: PlaceRecord) -> Result<(), StoreError> {
        if record.place_name.is_empty() {
            return Err(StoreError::MissingPlaceName);
        }
        if self.places.iter().any(|place| place.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        self.places.push(record);
        self.persist()
    }

    /// Drops every record with `id` and persists the rest. Returns whether
    /// anything was removed.
    pub fn remove_by_id(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.places.len();
        self.places.retain(|place| place.id != id);
        let removed = self.places.len() != before;
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(&self.places)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.storage.set_item(STORAGE_KEY, &serialized)
    }
}
