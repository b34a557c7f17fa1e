//! Word Search core crate.
//!
//! Grid generation, drag-selection matching and level/score/timer bookkeeping
//! live in plain Rust modules that build and test on the host. The `board`
//! module is the browser binding: it renders into the page, feeds pointer and
//! timer events into a [`GameSession`] and plays feedback sounds.

use wasm_bindgen::prelude::*;

mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod level;
pub mod player;
pub mod selection;
pub mod session;
pub mod timer;

pub use board::LocalStore;
pub use config::GameConfig;
pub use error::{GridError, LevelError, PlayerError, SessionError};
pub use grid::{Cell, Grid, Orientation, Placement};
pub use level::{Level, builtin_levels};
pub use selection::{SelectionTracker, Verdict};
pub use session::{GameEvent, GameSession, GameState};
pub use timer::{Countdown, TimerHandle};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wires the start screen, grid and buttons. The game itself begins when the
/// player submits a name.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    board::start_board()
}

/// Name saved by a previous visit, if any.
#[wasm_bindgen]
pub fn stored_player_name() -> Option<String> {
    player::load_name(&LocalStore).ok().flatten()
}
