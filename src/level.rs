//! Level table.
//!
//! A level is a grid size plus the words hidden in it. The built-in table is
//! ordered from small to large grids; the active level is picked by index.

use crate::error::{GridError, LevelError};
use crate::grid;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Level {
    pub grid_size: usize,
    pub words: Vec<String>,
}

impl Level {
    /// Builds a level, rejecting words that cannot fit the grid.
    pub fn new<S: Into<String>>(
        grid_size: usize,
        words: impl IntoIterator<Item = S>,
    ) -> Result<Self, GridError> {
        let level = Self { grid_size, words: words.into_iter().map(Into::into).collect() };
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        grid::validate(self.grid_size, &self.words)
    }

    /// Number of distinct words; a level is done once this many are found.
    pub fn word_count(&self) -> usize {
        let distinct: std::collections::HashSet<&str> = self.words.iter().map(String::as_str).collect();
        distinct.len()
    }
}

const BUILTIN: [(usize, &[&str]); 5] = [
    (8, &["SCI", "TECH", "RAM", "LUA", "ROM"]),
    (10, &["PYTHON", "JAVASCRIPT", "HTML", "CSS", "REACT"]),
    (12, &["MACHINE", "LEARNING", "ALGORITHM", "DATABASE", "KOTLIN"]),
    (14, &["SCIENTIFIC", "CALCULATOR", "ASTRONOMY", "BIOINFORMATICS", "HYPOTHESIS"]),
    (16, &["THERMODYNAMICS", "METAPHYSICS", "ELECTROMAGNETISM", "QUANTUM", "NANOTECHNOLOGY"]),
];

/// The shipped five-level table.
pub fn builtin_levels() -> &'static [Level] {
    use std::sync::OnceLock;
    static LEVELS: OnceLock<Vec<Level>> = OnceLock::new();
    LEVELS.get_or_init(|| {
        BUILTIN
            .iter()
            .map(|&(grid_size, words)| Level {
                grid_size,
                words: words.iter().map(|w| w.to_string()).collect(),
            })
            .collect()
    })
}

/// Checks a whole table: at least one level, every level placeable.
pub fn validate_levels(levels: &[Level]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    for (index, level) in levels.iter().enumerate() {
        level.validate().map_err(|source| LevelError::InvalidLevel { index, source })?;
    }
    Ok(())
}

/// Parses and validates a level table such as
/// `[{"gridSize": 8, "words": ["SCI", "TECH"]}]`.
#[cfg(feature = "serde_json")]
pub fn levels_from_json(raw: &str) -> Result<Vec<Level>, LevelError> {
    let levels: Vec<Level> = serde_json::from_str(raw).map_err(|e| LevelError::Json(e.to_string()))?;
    validate_levels(&levels)?;
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid_and_growing() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 5);
        validate_levels(levels).unwrap();
        for pair in levels.windows(2) {
            assert!(pair[0].grid_size < pair[1].grid_size);
        }
    }

    #[test]
    fn test_word_count_ignores_repeats() {
        assert_eq!(Level::new(6, ["CAT", "DOG", "CAT"]).unwrap().word_count(), 2);
    }

    #[test]
    fn test_level_new_rejects_long_word() {
        let err = Level::new(4, ["CAT", "HORSE"]).unwrap_err();
        assert!(matches!(err, GridError::WordTooLong { len: 5, size: 4, .. }));
    }

    #[test]
    fn test_validate_levels_reports_index() {
        let levels = vec![
            Level::new(4, ["CAT"]).unwrap(),
            Level { grid_size: 3, words: vec!["dog".into()] },
        ];
        match validate_levels(&levels) {
            Err(LevelError::InvalidLevel { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(validate_levels(&[]), Err(LevelError::NoLevels));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_levels_from_json() {
        let levels = levels_from_json(r#"[{"gridSize": 5, "words": ["CAT", "DOG"]}]"#).unwrap();
        assert_eq!(levels[0], Level::new(5, ["CAT", "DOG"]).unwrap());
        assert!(matches!(levels_from_json("[]"), Err(LevelError::NoLevels)));
        assert!(matches!(levels_from_json("{"), Err(LevelError::Json(_))));
    }
}
