//! Browser ports: persistence, sound and sharing.

pub mod audio;
pub mod share;
pub mod storage;

pub use audio::Beeper;
pub use storage::{KeyValueStore, LocalStore, MemoryStore};

use crate::config::{SETTINGS_KEY, Settings};
use crate::error::PlatformError;

/// Seed for the session's random source.
pub fn entropy_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    match store.get(SETTINGS_KEY) {
        Ok(Some(raw)) => Settings::from_json(&raw),
        Ok(None) => Settings::default(),
        Err(err) => {
            tracing::warn!(%err, "could not read settings");
            Settings::default()
        }
    }
}

pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<(), PlatformError> {
    let raw = settings.to_json()?;
    store.set(SETTINGS_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_persist_through_store() {
        let mut store = MemoryStore::default();
        assert_eq!(load_settings(&store), Settings::default());
        save_settings(&mut store, &Settings { sound: false }).unwrap();
        assert!(!load_settings(&store).sound);
    }
}
