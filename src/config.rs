//! Runner configuration, read from the environment.

/// Level played when `MATCH3_LEVEL_PATH` is not set: a 7x7 score level.
pub const DEFAULT_LEVEL_JSON: &str = r#"{
    "width": 7,
    "height": 7,
    "cell_size": 1.0,
    "item_size": 0.8,
    "items": ["red", "orange", "yellow", "green", "blue", "purple"],
    "random_fill": true,
    "moves": 25,
    "target": "score",
    "target_score": 3000
}"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// JSON level file; `None` plays [`DEFAULT_LEVEL_JSON`]
    pub level_path: Option<String>,
    pub seed: u32,
    pub max_turns: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            level_path: None,
            seed: 1,
            max_turns: 500,
        }
    }
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        use std::env;

        Self::from_vars(
            env::var("MATCH3_LEVEL_PATH").ok(),
            env::var("MATCH3_SEED").ok(),
            env::var("MATCH3_MAX_TURNS").ok(),
        )
    }

    /// Build from raw variable values. Unparsable numbers fall back to defaults.
    pub fn from_vars(
        level_path: Option<String>,
        seed: Option<String>,
        max_turns: Option<String>,
    ) -> Self {
        let defaults = Self::default();

        let level_path = level_path
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });
        let seed = seed
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let max_turns = max_turns
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_turns);

        Self {
            level_path,
            seed,
            max_turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_defaults() {
        assert_eq!(RunnerConfig::from_vars(None, None, None), RunnerConfig::default());
    }

    #[test]
    fn test_from_vars_parses_values() {
        let config = RunnerConfig::from_vars(
            Some(" levels/one.json ".to_string()),
            Some("42".to_string()),
            Some("12".to_string()),
        );
        assert_eq!(config.level_path.as_deref(), Some("levels/one.json"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_turns, 12);
    }

    #[test]
    fn test_from_vars_ignores_garbage() {
        let config = RunnerConfig::from_vars(
            Some("   ".to_string()),
            Some("not-a-number".to_string()),
            Some("-3".to_string()),
        );
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = RunnerConfig::from_env();
    }
}
