// Feedback sounds and background music. A sound that fails to load or play
// only produces a console warning; the game carries on silently.
use gloo::console::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

const CORRECT_SRC: &str = "correct.mp3";
const INCORRECT_SRC: &str = "incorrect.mp3";
const MUSIC_SRC: &str = "gamemusicloop.mp3";
const MUSIC_VOLUME: f64 = 0.5;

pub struct Sounds {
    correct: Option<HtmlAudioElement>,
    incorrect: Option<HtmlAudioElement>,
    music: Option<HtmlAudioElement>,
}

impl Sounds {
    pub fn load() -> Self {
        let music = load(MUSIC_SRC);
        if let Some(m) = &music {
            m.set_loop(true);
            m.set_volume(MUSIC_VOLUME);
        }
        Self { correct: load(CORRECT_SRC), incorrect: load(INCORRECT_SRC), music }
    }

    pub fn play_correct(&self) {
        play(self.correct.as_ref(), CORRECT_SRC, false);
    }

    pub fn play_incorrect(&self) {
        play(self.incorrect.as_ref(), INCORRECT_SRC, false);
    }

    /// Music is the one sound the player is told about when it is blocked,
    /// usually by the browser's autoplay policy.
    pub fn start_music(&self) {
        play(self.music.as_ref(), MUSIC_SRC, true);
    }
}

fn load(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(el) => Some(el),
        Err(err) => {
            warn!(format!("word search: could not load {src}"), err);
            None
        }
    }
}

fn play(el: Option<&HtmlAudioElement>, src: &str, alert_on_failure: bool) {
    let Some(el) = el else {
        return;
    };
    let src = src.to_string();
    let report = move |err: JsValue| {
        warn!(format!("word search: audio play failed for {src}"), err);
        if alert_on_failure {
            gloo::dialogs::alert("Audio could not be played. Please check your browser settings.");
        }
    };
    match el.play() {
        Ok(promise) => {
            let promise: js_sys::Promise = promise;
            let on_reject = Closure::once(report);
            let _ = promise.catch(&on_reject);
            on_reject.forget();
        }
        Err(err) => report(err),
    }
}
