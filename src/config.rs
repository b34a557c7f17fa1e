use crate::grid::DEFAULT_MAX_ATTEMPTS;

/// Seconds on the clock at the start of every level.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 50;
/// Points per found word.
pub const DEFAULT_WORD_REWARD: u32 = 10;

/// Tunables for a game session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GameConfig {
    pub time_limit_secs: u32,
    pub word_reward: u32,
    /// Per-word placement attempts before grid generation fails.
    pub max_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            word_reward: DEFAULT_WORD_REWARD,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(all(test, feature = "serde_json"))]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"timeLimitSecs": 30}"#).unwrap();
        assert_eq!(cfg.time_limit_secs, 30);
        assert_eq!(cfg.word_reward, DEFAULT_WORD_REWARD);
        assert_eq!(cfg.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
