//! Key-value persistence port. The browser build talks to `localStorage`;
//! tests and storage-less browsers use the in-memory map.

use std::collections::HashMap;

use crate::config::HIGH_SCORE_KEY;
use crate::error::PlatformError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    pub fn open() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(PlatformError::StorageUnavailable),
            Err(err) => Err(PlatformError::js(PlatformError::Storage, err)),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlatformError> {
        self.storage
            .get_item(key)
            .map_err(|err| PlatformError::js(PlatformError::Storage, err))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| PlatformError::js(PlatformError::Storage, err))
    }
}

/// Opens `localStorage`, or an in-memory stand-in when the browser refuses.
pub fn open_default() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(err) => {
            tracing::warn!(%err, "scores will not persist");
            Box::new(MemoryStore::default())
        }
    }
}

/// Accepts integers and finite non-negative decimals (floored).
pub fn parse_high_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v.floor() as u64),
        _ => None,
    }
}

/// Stored best score; missing, unreadable or garbage values read as 0.
pub fn load_high_score(store: &dyn KeyValueStore) -> u64 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(raw)) => parse_high_score(&raw).unwrap_or_else(|| {
            tracing::warn!(raw = %raw, "ignoring malformed high score");
            0
        }),
        Ok(None) => 0,
        Err(err) => {
            tracing::warn!(%err, "could not read high score");
            0
        }
    }
}

pub fn save_high_score(store: &mut dyn KeyValueStore, score: u64) -> Result<(), PlatformError> {
    store.set(HIGH_SCORE_KEY, &score.to_string())
}
