//! Engine configuration.
//!
//! Games configure the engine at startup with an `EngineConfig`. Nothing
//! in the engine hardcodes the player count, the highest age, or how long
//! repeat loops and pending choices may run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Highest age printed on a card.
pub const DEFAULT_MAX_AGE: u8 = 10;

/// Default bound on consecutive `Continue` steps within one effect run.
pub const DEFAULT_MAX_CONTINUE_STEPS: u32 = 256;

/// Configuration shared by the primitives and the executor.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use dogma_engine::core::EngineConfig;
///
/// let config = EngineConfig::new(3)
///     .with_max_continue_steps(64)
///     .with_choice_timeout(Duration::from_secs(30));
///
/// assert_eq!(config.player_count, 3);
/// assert_eq!(config.max_age, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of seats (1-255).
    pub player_count: usize,

    /// Highest age with a supply pile. Drawing above it ends the game.
    pub max_age: u8,

    /// Maximum `Continue` results an effect may return in a row.
    pub max_continue_steps: u32,

    /// How long a pending choice may stay unanswered before the executor
    /// is allowed to synthesize a default answer. `None` waits forever.
    pub choice_timeout: Option<Duration>,
}

impl EngineConfig {
    /// Create a configuration with default limits.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            max_age: DEFAULT_MAX_AGE,
            max_continue_steps: DEFAULT_MAX_CONTINUE_STEPS,
            choice_timeout: None,
        }
    }

    /// Set the highest age.
    #[must_use]
    pub fn with_max_age(mut self, max_age: u8) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set the repeat bound.
    #[must_use]
    pub fn with_max_continue_steps(mut self, steps: u32) -> Self {
        self.max_continue_steps = steps;
        self
    }

    /// Set the pending-choice timeout.
    #[must_use]
    pub fn with_choice_timeout(mut self, timeout: Duration) -> Self {
        self.choice_timeout = Some(timeout);
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be 1-255, got {}",
                self.player_count
            )));
        }
        if self.max_age == 0 {
            return Err(EngineError::InvalidConfig("max age must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new(2);
        assert_eq!(config.max_age, DEFAULT_MAX_AGE);
        assert_eq!(config.max_continue_steps, DEFAULT_MAX_CONTINUE_STEPS);
        assert_eq!(config.choice_timeout, None);
    }

    #[test]
    fn test_validate_player_count() {
        assert!(EngineConfig::new(0).validate().is_err());
        assert!(EngineConfig::new(256).validate().is_err());
        assert!(EngineConfig::new(4).validate().is_ok());
    }

    #[test]
    fn test_validate_max_age() {
        assert!(EngineConfig::new(2).with_max_age(0).validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::new(3).with_choice_timeout(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        let restored: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
