// Round configuration for Nim Core

use serde::{Deserialize, Serialize};

use crate::types::{NimError, Result};

/// Smallest heap count and token count a round can be dealt with
pub const MIN_DEAL: usize = 2;

/// Largest heap count and token count a round can be dealt with
pub const MAX_DEAL: usize = 64;

/// Settings for dealing a round
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Upper bound (inclusive) on the number of heaps
    pub max_columns: usize,
    /// Upper bound (inclusive) on the tokens in each heap
    pub max_tokens: usize,
    /// Seed for deterministic deals
    pub seed: Option<String>,
    /// Pause the page should wait before asking for the computer's move
    pub computer_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_columns: 5,
            max_tokens: 5,
            seed: None,
            computer_delay_ms: 2000,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<GameConfig> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| NimError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both bounds lie within `MIN_DEAL..=MAX_DEAL`
    pub fn validate(&self) -> Result<()> {
        check_bound("max_columns", self.max_columns)?;
        check_bound("max_tokens", self.max_tokens)
    }
}

fn check_bound(name: &str, value: usize) -> Result<()> {
    if !(MIN_DEAL..=MAX_DEAL).contains(&value) {
        return Err(NimError::InvalidConfig(format!(
            "{} must be between {} and {}, got {}",
            name, MIN_DEAL, MAX_DEAL, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_columns, 5);
        assert_eq!(config.max_tokens, 5);
        assert_eq!(config.seed, None);
        assert_eq!(config.computer_delay_ms, 2000);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json(r#"{"max_tokens": 9, "seed": "abc"}"#).unwrap();
        assert_eq!(config.max_columns, 5);
        assert_eq!(config.max_tokens, 9);
        assert_eq!(config.seed.as_deref(), Some("abc"));
    }

    #[test]
    fn test_rejects_small_bounds() {
        let err = GameConfig::from_json(r#"{"max_columns": 1}"#).unwrap_err();
        assert!(matches!(err, NimError::InvalidConfig(_)));

        let err = GameConfig::from_json(r#"{"max_tokens": 0}"#).unwrap_err();
        assert!(matches!(err, NimError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_oversized_bounds() {
        let err = GameConfig::from_json(
            r#"{"max_columns": 100000000000, "max_tokens": 100000000000}"#,
        )
        .unwrap_err();
        assert!(matches!(err, NimError::InvalidConfig(_)));

        let err = GameConfig::from_json(r#"{"max_tokens": 65}"#).unwrap_err();
        assert!(matches!(err, NimError::InvalidConfig(_)));
    }

    #[test]
    fn test_accepts_largest_bounds() {
        let json = format!(r#"{{"max_columns": {0}, "max_tokens": {0}}}"#, MAX_DEAL);
        let config = GameConfig::from_json(&json).unwrap();
        assert_eq!(config.max_columns, MAX_DEAL);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, NimError::SerializationError(_)));
    }
}
