//! Player name: the only state that survives a page reload.

use std::collections::HashMap;

use crate::error::PlayerError;

/// Storage key for the player name.
pub const PLAYER_NAME_KEY: &str = "playerName";

/// Minimal string key-value store. The browser build backs this with
/// `localStorage`.
pub trait PlayerStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlayerError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PlayerError>;
}

/// Trims the entered name; an empty result blocks the game from starting.
pub fn validate_name(raw: &str) -> Result<String, PlayerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PlayerError::EmptyName);
    }
    Ok(name.to_string())
}

/// Validates and stores the name, returning the stored value.
pub fn save_name<S: PlayerStore + ?Sized>(store: &mut S, raw: &str) -> Result<String, PlayerError> {
    let name = validate_name(raw)?;
    store.set(PLAYER_NAME_KEY, &name)?;
    Ok(name)
}

pub fn load_name<S: PlayerStore + ?Sized>(store: &S) -> Result<Option<String>, PlayerError> {
    store.get(PLAYER_NAME_KEY)
}

/// In-process store, for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl PlayerStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlayerError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlayerError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
