//! Drag selection tracking.
//!
//! One gesture is one `Idle -> Selecting -> Idle` cycle. Nothing survives from
//! one gesture to the next.

use crate::grid::{Cell, Grid};

/// Whether a finished gesture spelled a level word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The spelled string is one of the level words.
    Matched(String),
    /// The spelled string (possibly empty) is not a level word.
    Rejected(String),
}

/// A completed gesture: the path that was dragged and what it spelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finished {
    pub cells: Vec<Cell>,
    pub verdict: Verdict,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    cells: Vec<Cell>,
    selecting: bool,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Current path, first cell first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Pointer down. Any half-finished selection is dropped.
    pub fn start(&mut self, cell: Cell) {
        self.selecting = true;
        self.cells.clear();
        self.cells.push(cell);
    }

    /// Pointer entered `cell`. Returns true if the path grew.
    pub fn extend(&mut self, cell: Cell) -> bool {
        if !self.selecting || self.cells.contains(&cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    /// Pointer up. Spells the path against `grid` and checks it against
    /// `words`; `None` if no gesture was in progress.
    pub fn finish<S: AsRef<str>>(&mut self, grid: &Grid, words: &[S]) -> Option<Finished> {
        if !self.selecting {
            return None;
        }
        self.selecting = false;
        let cells = std::mem::take(&mut self.cells);
        // Off-grid cells never reach here through the session, but spell nothing if they do.
        let candidate = grid.spell(&cells).unwrap_or_default();
        let verdict = if words.iter().any(|w| w.as_ref() == candidate) {
            Verdict::Matched(candidate)
        } else {
            Verdict::Rejected(candidate)
        };
        Some(Finished { cells, verdict })
    }

    /// Drops any in-progress selection without a verdict.
    pub fn cancel(&mut self) {
        self.selecting = false;
        self.cells.clear();
    }
}
