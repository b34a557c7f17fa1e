use wasm_bindgen::JsValue;
use web_sys::{Storage, window};

use crate::error::PlayerError;
use crate::player::PlayerStore;

/// [`PlayerStore`] over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

fn local_storage() -> Result<Storage, PlayerError> {
    window()
        .ok_or_else(|| PlayerError::Storage("no window".into()))?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| PlayerError::Storage("localStorage disabled".into()))
}

fn js_error(err: JsValue) -> PlayerError {
    PlayerError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl PlayerStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, PlayerError> {
        local_storage()?.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlayerError> {
        local_storage()?.set_item(key, value).map_err(js_error)
    }
}
