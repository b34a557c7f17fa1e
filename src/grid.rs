//! Letter grid generation.
//!
//! Words are dropped into an empty square one at a time, each at a random
//! horizontal or vertical span whose cells are all still empty. Words never
//! share a cell, even where the letters would agree. Whatever is left empty
//! afterwards gets a random letter.

use rand::Rng;

use crate::error::GridError;

/// Uppercase filler alphabet.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Placement attempts per word before generation gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Grid coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
}

impl Orientation {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) { Orientation::Horizontal } else { Orientation::Vertical }
    }

    /// Largest start (row, col) for a run of `len` in a `size` grid, inclusive.
    fn start_bounds(self, size: usize, len: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (size - 1, size - len),
            Orientation::Vertical => (size - len, size - 1),
        }
    }
}

/// Where a word ended up in the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub start: Cell,
    pub orientation: Orientation,
}

impl Placement {
    /// Cells covered by the word, first letter first.
    pub fn cells(&self) -> Vec<Cell> {
        span(self.start, self.orientation, self.word.len()).collect()
    }
}

fn span(start: Cell, orientation: Orientation, len: usize) -> impl Iterator<Item = Cell> {
    (0..len).map(move |i| match orientation {
        Orientation::Horizontal => Cell::new(start.row, start.col + i),
        Orientation::Vertical => Cell::new(start.row + i, start.col),
    })
}

/// A fully populated square of uppercase letters, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    letters: Vec<u8>,
    placements: Vec<Placement>,
}

impl Grid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains_cell(&self, cell: Cell) -> bool {
        cell.row < self.size && cell.col < self.size
    }

    pub fn letter(&self, cell: Cell) -> Option<char> {
        if !self.contains_cell(cell) {
            return None;
        }
        Some(self.letters[cell.row * self.size + cell.col] as char)
    }

    /// Rows top to bottom, each exactly `size` letters.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.letters.chunks(self.size)
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Letters along `path` in order, or `None` if any cell is off the grid.
    pub fn spell(&self, path: &[Cell]) -> Option<String> {
        path.iter().map(|&cell| self.letter(cell)).collect()
    }

    /// Builds a grid from explicit rows. Used for fixed boards; the rows must
    /// form a square of uppercase letters.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut letters = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            if row.len() != size || !is_word(row) {
                return Err(GridError::InvalidWord { word: row.to_string() });
            }
            letters.extend_from_slice(row.as_bytes());
        }
        Ok(Self { size, letters, placements: Vec::new() })
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|&b| (b as char).to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

fn is_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_uppercase())
}

/// Checks the preconditions `generate` relies on to terminate sensibly.
pub fn validate<S: AsRef<str>>(size: usize, words: &[S]) -> Result<(), GridError> {
    if size == 0 {
        return Err(GridError::EmptyGrid);
    }
    for word in words {
        let word = word.as_ref();
        if !is_word(word) {
            return Err(GridError::InvalidWord { word: word.to_string() });
        }
        if word.len() > size {
            return Err(GridError::WordTooLong { word: word.to_string(), len: word.len(), size });
        }
    }
    Ok(())
}

/// Generates a `size`×`size` grid hiding every word in `words`.
pub fn generate<S, R>(size: usize, words: &[S], rng: &mut R) -> Result<Grid, GridError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    generate_with_attempts(size, words, DEFAULT_MAX_ATTEMPTS, rng)
}

/// Like [`generate`], with an explicit per-word attempt cap.
pub fn generate_with_attempts<S, R>(
    size: usize,
    words: &[S],
    max_attempts: usize,
    rng: &mut R,
) -> Result<Grid, GridError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    validate(size, words)?;

    let mut cells: Vec<Option<u8>> = vec![None; size * size];
    let mut placements = Vec::with_capacity(words.len());

    for word in words {
        let word = word.as_ref();
        let placement = place_word(&mut cells, size, word, max_attempts, rng).ok_or_else(|| {
            GridError::PlacementExhausted { word: word.to_string(), attempts: max_attempts }
        })?;
        placements.push(placement);
    }

    let letters = cells
        .into_iter()
        .map(|cell| cell.unwrap_or_else(|| ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect();

    Ok(Grid { size, letters, placements })
}

fn place_word<R: Rng + ?Sized>(
    cells: &mut [Option<u8>],
    size: usize,
    word: &str,
    max_attempts: usize,
    rng: &mut R,
) -> Option<Placement> {
    let len = word.len();
    for _ in 0..max_attempts {
        let orientation = Orientation::random(rng);
        let (max_row, max_col) = orientation.start_bounds(size, len);
        let start = Cell::new(rng.gen_range(0..=max_row), rng.gen_range(0..=max_col));

        if !span(start, orientation, len).all(|c| cells[c.row * size + c.col].is_none()) {
            continue;
        }
        for (c, letter) in span(start, orientation, len).zip(word.bytes()) {
            cells[c.row * size + c.col] = Some(letter);
        }
        return Some(Placement { word: word.to_string(), start, orientation });
    }
    None
}
