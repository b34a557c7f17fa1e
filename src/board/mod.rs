//! Browser binding for the word-search board.
//!
//! The page provides the start screen (`#startScreen`, `#playerName`,
//! `#startGameBtn`), the game container (`#gameContainer`, `#grid`, `#words`,
//! `#score`, `#timer`, `#playerDisplay`, `#restart`) and the level overlay
//! (`#levelCompletionOverlay` with its title, subtitle, progress bar and
//! buttons). This module owns one [`GameSession`], turns DOM events into
//! session calls and draws whatever [`GameEvent`]s come back.
use gloo::console::{log, warn};
use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, window};

use crate::grid::Cell;
use crate::error::{PlayerError, SessionError};
use crate::player;
use crate::session::{GameEvent, GameSession};
use crate::timer::TimerHandle;

mod audio;
mod render;
mod storage;

pub use storage::LocalStore;

/// How long a rejected path stays highlighted.
const REJECT_FLASH_MS: u32 = 500;

/// Runtime board state.
struct BoardState {
    doc: Document,
    session: GameSession,
    // Interval paired with the countdown run it feeds; dropped on restart.
    interval: Option<(TimerHandle, Interval)>,
    sounds: audio::Sounds,
}

thread_local! {
    static BOARD_STATE: std::cell::RefCell<Option<BoardState>> = const { std::cell::RefCell::new(None) };
}

fn with_board<T>(f: impl FnOnce(&mut BoardState) -> T) -> Option<T> {
    BOARD_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn start_board() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Prefill the name field from the last visit.
    if let Some(input) = input_by_id(&doc, "playerName") {
        if let Ok(Some(name)) = player::load_name(&LocalStore) {
            input.set_value(&name);
        }
    }

    let board = BoardState {
        doc: doc.clone(),
        session: GameSession::builtin(),
        interval: None,
        sounds: audio::Sounds::load(),
    };
    BOARD_STATE.with(|b| b.replace(Some(board)));
    render::set_background(&doc, 0);

    on_click(&doc, "startGameBtn", begin_play);
    on_click(&doc, "restart", || run_session(|s| s.restart_level()));
    on_click(&doc, "nextLevelBtn", || run_session(|s| s.advance_level()));
    on_click(&doc, "completeGameBtn", || {
        dispatch(|s| s.reset_game());
        with_board(|state| {
            render::show(&state.doc, "levelCompletionOverlay", false);
            render::show(&state.doc, "gameContainer", false);
            render::show(&state.doc, "startScreen", true);
        });
    });

    // Drag tracking is delegated to the grid container so that regenerated
    // cells need no listeners of their own.
    if let Some(grid_el) = doc.get_element_by_id("grid") {
        EventListener::new(&grid_el, "mousedown", |evt| {
            if let Some(cell) = event_cell(evt) {
                evt.prevent_default();
                dispatch(|s| s.selection_start(cell));
            }
        })
        .forget();
        EventListener::new(&grid_el, "mouseover", |evt| {
            if let Some(cell) = event_cell(evt) {
                dispatch(|s| s.selection_extend(cell));
            }
        })
        .forget();
    }
    // Releasing outside the grid still ends the gesture.
    EventListener::new(&doc, "mouseup", |_evt| dispatch(|s| s.selection_end())).forget();

    log!("word search: board ready");
    Ok(())
}

fn on_click(doc: &Document, id: &str, handler: impl Fn() + 'static) {
    match doc.get_element_by_id(id) {
        Some(el) => {
            EventListener::new(&el, "click", move |_evt| handler()).forget();
        }
        None => {
            warn!(format!("word search: missing #{id}"));
        }
    }
}

fn input_by_id(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

/// Start button: validate and remember the name, then show the board.
fn begin_play() {
    let ready = with_board(|state| {
        let raw = input_by_id(&state.doc, "playerName")
            .map(|i| i.value())
            .unwrap_or_default();
        let name = match player::save_name(&mut LocalStore, &raw) {
            Ok(name) => name,
            Err(err @ PlayerError::EmptyName) => {
                gloo::dialogs::alert(&err.to_string());
                return false;
            }
            // Not remembered across reloads, but still playable.
            Err(err) => {
                warn!(format!("word search: {err}"));
                raw.trim().to_string()
            }
        };
        if let Some(el) = state.doc.get_element_by_id("playerDisplay") {
            el.set_text_content(Some(&format!("Player: {name}")));
        }
        render::show(&state.doc, "startScreen", false);
        render::show(&state.doc, "gameContainer", true);
        state.sounds.start_music();
        log!(format!("word search: {name} started"));
        true
    });
    if ready == Some(true) {
        run_session(|s| s.start());
    }
}

/// Reads `data-row` / `data-col` off the cell under the pointer.
fn event_cell(evt: &web_sys::Event) -> Option<Cell> {
    let el: Element = evt.target()?.dyn_into().ok()?;
    let row = el.get_attribute("data-row")?.parse().ok()?;
    let col = el.get_attribute("data-col")?.parse().ok()?;
    Some(Cell::new(row, col))
}

fn dispatch(f: impl FnOnce(&mut GameSession) -> Vec<GameEvent>) {
    with_board(|state| {
        let events = f(&mut state.session);
        apply_events(state, events);
    });
}

fn run_session(f: impl FnOnce(&mut GameSession) -> Result<Vec<GameEvent>, SessionError>) {
    with_board(|state| match f(&mut state.session) {
        Ok(events) => apply_events(state, events),
        Err(mut err) => {
            if let SessionError::ExpiredRestart { events, .. } = &mut err {
                apply_events(state, std::mem::take(events));
            }
            warn!(format!("word search: {err}"));
            gloo::dialogs::alert(&err.to_string());
            sync_interval(state);
        }
    });
}

fn on_tick(handle: TimerHandle) {
    run_session(|s| s.timer_tick(handle));
}

fn apply_events(state: &mut BoardState, events: Vec<GameEvent>) {
    let doc = &state.doc;
    for event in events {
        match event {
            GameEvent::LevelStarted { index } => {
                log!(format!("word search: level {} started", index + 1));
                render::set_background(doc, index);
                render::show(doc, "levelCompletionOverlay", false);
            }
            GameEvent::GridGenerated(grid) => {
                render::grid(doc, &grid);
                render::word_list(doc, &state.session.level().words);
            }
            GameEvent::SelectionChanged(cells) => {
                // A gesture released outside the window never sent mouseup.
                render::clear_selection(doc);
                render::mark_cells(doc, &cells, "selected", true);
            }
            GameEvent::WordMatched { word, cells } => {
                render::mark_cells(doc, &cells, "correct", true);
                render::strike_word(doc, &word);
                state.sounds.play_correct();
            }
            GameEvent::AlreadyFound { cells, .. } => {
                render::mark_cells(doc, &cells, "selected", false);
            }
            GameEvent::WordRejected { cells, .. } => {
                let doc = doc.clone();
                Timeout::new(REJECT_FLASH_MS, move || {
                    render::mark_cells(&doc, &cells, "selected", false);
                })
                .forget();
                state.sounds.play_incorrect();
            }
            GameEvent::ScoreChanged(score) => render::set_text(doc, "score", &format!("Score: {score}")),
            GameEvent::TimeTick(secs) => render::set_text(doc, "timer", &format!("Time: {secs}s")),
            GameEvent::TimeExpired => {
                log!("word search: time expired");
                gloo::dialogs::alert("Time's up! Restarting level.");
            }
            GameEvent::LevelCompleted { is_final, next_level } => {
                let done = state.session.level_index() + 1;
                log!(format!("word search: level {done} complete"));
                let (title, subtitle) = match next_level {
                    Some(next) if !is_final => {
                        (format!("Level {done} Complete!"), format!("Moving to Level {}", next + 1))
                    }
                    _ => ("Congratulations!".to_string(), "You completed all levels!".to_string()),
                };
                let progress = done as f64 / state.session.levels().len() as f64;
                render::level_overlay(doc, &title, &subtitle, progress, is_final);
            }
        }
    }
    sync_interval(state);
}

/// Keeps exactly one interval running, and only for the session's live
/// countdown. A stale interval is cancelled before its replacement starts.
fn sync_interval(state: &mut BoardState) {
    let wanted = state.session.timer_handle();
    if state.interval.as_ref().map(|(h, _)| *h) == wanted {
        return;
    }
    // Dropping an Interval clears it on the JS side.
    drop(state.interval.take());
    if let Some(handle) = wanted {
        let interval = Interval::new(1_000, move || on_tick(handle));
        state.interval = Some((handle, interval));
    }
}
