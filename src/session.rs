//! Game session: the single owner of level progress, score, found words,
//! the active grid and the countdown.
//!
//! Every inbound call returns the notifications it produced, in order. The
//! session never reaches into presentation; a renderer drains the returned
//! [`GameEvent`]s and draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::error::{LevelError, SessionError};
use crate::grid::{self, Cell, Grid};
use crate::level::{self, Level};
use crate::selection::{Finished, SelectionTracker, Verdict};
use crate::timer::{Countdown, Tick, TimerHandle};

/// Outbound notifications for the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A level (re)started; `index` is zero-based.
    LevelStarted { index: usize },
    GridGenerated(Grid),
    /// The in-progress drag path changed.
    SelectionChanged(Vec<Cell>),
    WordMatched { word: String, cells: Vec<Cell> },
    /// A level word that was already struck off was dragged again.
    AlreadyFound { word: String, cells: Vec<Cell> },
    WordRejected { candidate: String, cells: Vec<Cell> },
    ScoreChanged(u32),
    LevelCompleted { is_final: bool, next_level: Option<usize> },
    TimeTick(u32),
    TimeExpired,
}

/// Snapshot of the player's progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub level_index: usize,
    pub score: u32,
    /// In the order they were found.
    pub found_words: Vec<String>,
    pub time_remaining: u32,
}

pub struct GameSession<R = StdRng> {
    levels: Vec<Level>,
    config: GameConfig,
    rng: R,
    grid: Option<Grid>,
    tracker: SelectionTracker,
    countdown: Countdown,
    level_index: usize,
    score: u32,
    found_words: Vec<String>,
}

impl GameSession<StdRng> {
    /// Session over `levels` with an OS-seeded RNG.
    pub fn new(levels: Vec<Level>, config: GameConfig) -> Result<Self, LevelError> {
        Self::with_rng(levels, config, StdRng::from_entropy())
    }

    /// Session over the built-in level table with default tunables.
    pub fn builtin() -> Self {
        Self::from_parts(level::builtin_levels().to_vec(), GameConfig::default(), StdRng::from_entropy())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(levels: Vec<Level>, config: GameConfig, rng: R) -> Result<Self, LevelError> {
        level::validate_levels(&levels)?;
        Ok(Self::from_parts(levels, config, rng))
    }

    fn from_parts(levels: Vec<Level>, config: GameConfig, rng: R) -> Self {
        Self {
            levels,
            config,
            rng,
            grid: None,
            tracker: SelectionTracker::new(),
            countdown: Countdown::new(),
            level_index: 0,
            score: 0,
            found_words: Vec::new(),
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index + 1 == self.levels.len()
    }

    /// The current grid; `None` before `start` or after a failed generation.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn found_words(&self) -> &[String] {
        &self.found_words
    }

    pub fn selection(&self) -> &[Cell] {
        self.tracker.cells()
    }

    pub fn is_level_complete(&self) -> bool {
        self.found_words.len() == self.level().word_count()
    }

    /// Handle of the running countdown, if any. Ticks must carry it.
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.countdown.active_handle()
    }

    pub fn state(&self) -> GameState {
        GameState {
            level_index: self.level_index,
            score: self.score,
            found_words: self.found_words.clone(),
            time_remaining: self.countdown.remaining(),
        }
    }

    /// Generates the first grid and starts the clock on the current level.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        self.begin_level()
    }

    /// Fresh grid, empty found list, zero score and a full clock.
    pub fn restart_level(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        self.begin_level()
    }

    pub fn advance_level(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        if self.is_final_level() {
            return Err(SessionError::FinalLevel);
        }
        self.level_index += 1;
        self.begin_level()
    }

    /// Back to the first level with the clock stopped, as after finishing
    /// the final one. The next `start` deals a fresh grid.
    pub fn reset_game(&mut self) -> Vec<GameEvent> {
        self.level_index = 0;
        self.reset_progress();
        vec![GameEvent::ScoreChanged(0)]
    }

    fn reset_progress(&mut self) {
        self.tracker.cancel();
        self.found_words.clear();
        self.score = 0;
        self.countdown.stop();
        self.grid = None;
    }

    fn begin_level(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        self.reset_progress();

        let level = &self.levels[self.level_index];
        let grid = grid::generate_with_attempts(
            level.grid_size,
            &level.words,
            self.config.max_attempts,
            &mut self.rng,
        )?;
        self.grid = Some(grid.clone());
        self.countdown.start(self.config.time_limit_secs);

        Ok(vec![
            GameEvent::LevelStarted { index: self.level_index },
            GameEvent::GridGenerated(grid),
            GameEvent::ScoreChanged(0),
            GameEvent::TimeTick(self.config.time_limit_secs),
        ])
    }

    /// Input is only taken while a grid is up and the clock is running.
    fn accepting_input(&self) -> bool {
        self.grid.is_some() && self.countdown.is_running()
    }

    pub fn selection_start(&mut self, cell: Cell) -> Vec<GameEvent> {
        let on_grid = self.grid.as_ref().is_some_and(|g| g.contains_cell(cell));
        if !self.accepting_input() || !on_grid {
            return Vec::new();
        }
        self.tracker.start(cell);
        vec![GameEvent::SelectionChanged(self.tracker.cells().to_vec())]
    }

    pub fn selection_extend(&mut self, cell: Cell) -> Vec<GameEvent> {
        let on_grid = self.grid.as_ref().is_some_and(|g| g.contains_cell(cell));
        if self.accepting_input() && on_grid && self.tracker.extend(cell) {
            vec![GameEvent::SelectionChanged(self.tracker.cells().to_vec())]
        } else {
            Vec::new()
        }
    }

    pub fn selection_end(&mut self) -> Vec<GameEvent> {
        let Some(grid) = self.grid.as_ref() else {
            self.tracker.cancel();
            return Vec::new();
        };
        let words = &self.levels[self.level_index].words;
        let Some(Finished { cells, verdict }) = self.tracker.finish(grid, words) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        match verdict {
            Verdict::Matched(word) if self.found_words.contains(&word) => {
                events.push(GameEvent::AlreadyFound { word, cells });
            }
            Verdict::Matched(word) => {
                self.found_words.push(word.clone());
                self.score = self.score.saturating_add(self.config.word_reward);
                events.push(GameEvent::WordMatched { word, cells });
                events.push(GameEvent::ScoreChanged(self.score));
                if self.is_level_complete() {
                    self.countdown.stop();
                    let is_final = self.is_final_level();
                    let next_level = (!is_final).then_some(self.level_index + 1);
                    events.push(GameEvent::LevelCompleted { is_final, next_level });
                }
            }
            Verdict::Rejected(candidate) => {
                events.push(GameEvent::WordRejected { candidate, cells });
            }
        }
        events
    }

    /// One second elapsed on the interval identified by `handle`. Expiry
    /// restarts the level, so the returned events include the new grid.
    /// If the new grid cannot be dealt, the expiry events travel inside
    /// [`SessionError::ExpiredRestart`].
    pub fn timer_tick(&mut self, handle: TimerHandle) -> Result<Vec<GameEvent>, SessionError> {
        match self.countdown.tick(handle) {
            Tick::Ignored => Ok(Vec::new()),
            Tick::Remaining(secs) => Ok(vec![GameEvent::TimeTick(secs)]),
            Tick::Expired => {
                let mut events = vec![GameEvent::TimeTick(0), GameEvent::TimeExpired];
                match self.restart_level() {
                    Ok(restart) => {
                        events.extend(restart);
                        Ok(events)
                    }
                    Err(SessionError::Grid(source)) => Err(SessionError::ExpiredRestart { events, source }),
                    Err(other) => Err(other),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn session(levels: Vec<Level>) -> GameSession {
        GameSession::with_rng(levels, GameConfig::default(), StdRng::seed_from_u64(42)).unwrap()
    }

    fn cat_dog() -> Vec<Level> {
        vec![Level::new(5, ["CAT", "DOG"]).unwrap(), Level::new(5, ["EMU"]).unwrap()]
    }

    fn drag_word<R: Rng>(s: &mut GameSession<R>, word: &str) -> Vec<GameEvent> {
        let cells = s.grid().unwrap().placements().iter().find(|p| p.word == word).unwrap().cells();
        s.selection_start(cells[0]);
        for &c in &cells[1..] {
            s.selection_extend(c);
        }
        s.selection_end()
    }

    #[test]
    fn test_start_emits_level_grid_and_clock() {
        let mut s = session(cat_dog());
        let events = s.start().unwrap();
        assert_eq!(events[0], GameEvent::LevelStarted { index: 0 });
        assert!(matches!(events[1], GameEvent::GridGenerated(ref g) if g.size() == 5));
        assert_eq!(events[3], GameEvent::TimeTick(50));
        assert!(s.timer_handle().is_some());
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut s = session(cat_dog());
        assert!(s.selection_start(Cell::new(0, 0)).is_empty());
        assert!(s.selection_end().is_empty());
    }

    #[test]
    fn test_off_grid_cells_are_ignored() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        assert!(s.selection_start(Cell::new(9, 9)).is_empty());
        s.selection_start(Cell::new(0, 0));
        assert!(s.selection_extend(Cell::new(0, 5)).is_empty());
        assert_eq!(s.selection(), &[Cell::new(0, 0)]);
    }

    #[test]
    fn test_match_then_duplicate_is_idempotent() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        let events = drag_word(&mut s, "CAT");
        assert!(matches!(&events[0], GameEvent::WordMatched { word, .. } if word == "CAT"));
        assert_eq!(events[1], GameEvent::ScoreChanged(10));
        let again = drag_word(&mut s, "CAT");
        assert!(matches!(&again[..], [GameEvent::AlreadyFound { word, .. }] if word == "CAT"));
        assert_eq!(s.score(), 10);
        assert_eq!(s.found_words(), &["CAT".to_string()]);
    }

    #[test]
    fn test_completion_stops_clock_and_points_at_next_level() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        drag_word(&mut s, "CAT");
        let events = drag_word(&mut s, "DOG");
        assert_eq!(
            events.last(),
            Some(&GameEvent::LevelCompleted { is_final: false, next_level: Some(1) })
        );
        assert!(s.timer_handle().is_none());
        // board is frozen until the player moves on
        assert!(s.selection_start(Cell::new(0, 0)).is_empty());

        s.advance_level().unwrap();
        assert_eq!(s.level_index(), 1);
        assert!(s.found_words().is_empty());
        let events = drag_word(&mut s, "EMU");
        assert_eq!(events.last(), Some(&GameEvent::LevelCompleted { is_final: true, next_level: None }));
        assert_eq!(s.advance_level(), Err(SessionError::FinalLevel));
    }

    #[test]
    fn test_expiry_restarts_level_once() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        drag_word(&mut s, "CAT");
        let first = s.timer_handle().unwrap();
        let mut expired = 0;
        for _ in 0..50 {
            let events = s.timer_tick(first).unwrap();
            expired += events.iter().filter(|e| **e == GameEvent::TimeExpired).count();
        }
        assert_eq!(expired, 1);
        assert_eq!(s.score(), 0);
        assert!(s.found_words().is_empty());
        let second = s.timer_handle().unwrap();
        assert_ne!(first, second);
        assert!(s.timer_tick(first).unwrap().is_empty());
        assert_eq!(s.state().time_remaining, 50);
    }

    #[test]
    fn test_reset_game_returns_to_first_level() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        s.advance_level().unwrap();
        assert_eq!(s.reset_game(), vec![GameEvent::ScoreChanged(0)]);
        assert_eq!(s.level_index(), 0);
        assert!(s.timer_handle().is_none());
        assert!(s.grid().is_none());
        let events = s.start().unwrap();
        assert_eq!(events[0], GameEvent::LevelStarted { index: 0 });
    }

    #[test]
    fn test_score_saturates_on_huge_reward() {
        let cfg = GameConfig { word_reward: u32::MAX, ..GameConfig::default() };
        let mut s = GameSession::with_rng(cat_dog(), cfg, StdRng::seed_from_u64(42)).unwrap();
        s.start().unwrap();
        drag_word(&mut s, "CAT");
        let events = drag_word(&mut s, "DOG");
        assert!(events.contains(&GameEvent::ScoreChanged(u32::MAX)));
        assert_eq!(s.score(), u32::MAX);
        assert!(s.is_level_complete());
    }

    #[test]
    fn test_restart_mid_drag_drops_selection() {
        let mut s = session(cat_dog());
        s.start().unwrap();
        let cat = s.grid().unwrap().placements()[0].cells();
        s.selection_start(cat[0]);
        s.selection_extend(cat[1]);
        s.restart_level().unwrap();
        assert!(s.selection().is_empty());
        assert!(s.selection_end().is_empty());
        assert!(s.found_words().is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_expiry_mid_drag_drops_selection() {
        let cfg = GameConfig { time_limit_secs: 1, ..GameConfig::default() };
        let mut s = GameSession::with_rng(cat_dog(), cfg, StdRng::seed_from_u64(42)).unwrap();
        s.start().unwrap();
        let cat = s.grid().unwrap().placements()[0].cells();
        s.selection_start(cat[0]);
        s.selection_extend(cat[1]);
        let handle = s.timer_handle().unwrap();
        let events = s.timer_tick(handle).unwrap();
        assert!(events.contains(&GameEvent::TimeExpired));
        assert!(s.selection().is_empty());
        assert!(s.selection_end().is_empty());
    }

    #[test]
    fn test_expiry_events_survive_failed_restart() {
        // One attempt per word on a 3x3 board: the first deal sometimes
        // succeeds, the redeal usually does not.
        let cfg = GameConfig { time_limit_secs: 1, max_attempts: 1, ..GameConfig::default() };
        let level = || vec![Level::new(3, ["ABC", "DEF", "GHI"]).unwrap()];
        let failure = (0..2_000u64).find_map(|seed| {
            let mut s = GameSession::with_rng(level(), cfg.clone(), StdRng::seed_from_u64(seed)).unwrap();
            s.start().ok()?;
            let handle = s.timer_handle()?;
            match s.timer_tick(handle) {
                Err(err) => Some((s, err)),
                Ok(_) => None,
            }
        });
        let (s, err) = failure.expect("no seed produced a failed redeal");
        match err {
            SessionError::ExpiredRestart { events, source } => {
                assert_eq!(events, vec![GameEvent::TimeTick(0), GameEvent::TimeExpired]);
                assert!(matches!(source, GridError::PlacementExhausted { attempts: 1, .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(s.grid().is_none());
        assert!(s.timer_handle().is_none());
    }

    #[test]
    fn test_generation_failure_is_reported() {
        let cfg = GameConfig { max_attempts: 50, ..GameConfig::default() };
        let levels = vec![Level::new(2, ["AB", "CD", "EF"]).unwrap()];
        let mut s = GameSession::with_rng(levels, cfg, StdRng::seed_from_u64(1)).unwrap();
        assert!(matches!(s.start(), Err(SessionError::Grid(_))));
        assert!(s.grid().is_none());
        assert!(s.timer_handle().is_none());
    }
}
