// Browser-only tests; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use word_search::LocalStore;
use word_search::player::{self, PlayerStore};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn player_name_survives_in_local_storage() {
    let mut store = LocalStore;
    let saved = player::save_name(&mut store, "  Grace ").unwrap();
    assert_eq!(saved, "Grace");
    assert_eq!(player::load_name(&LocalStore).unwrap(), Some("Grace".to_string()));
    assert_eq!(store.get("missing-key").unwrap(), None);
    assert_eq!(word_search::stored_player_name(), Some("Grace".to_string()));
}
