//! Verifier configuration
//!
//! Controls key naming, cleanup, and which strategies a verification run
//! covers.

use crate::strategy::StrategyKind;

/// Round-trip verifier configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Prepended to every derived key (default: empty)
    pub key_prefix: String,
    /// Delete each key once its round trip is checked (default: true)
    pub cleanup: bool,
    /// Strategies run by `verify_all` (default: all)
    pub strategies: Vec<StrategyKind>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            key_prefix: String::new(),
            cleanup: true,
            strategies: StrategyKind::ALL.to_vec(),
        }
    }
}

impl VerifierConfig {
    /// Set key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set whether keys are deleted after verification
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Set the strategies to run
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = StrategyKind>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    /// Run a single strategy
    pub fn with_strategy(self, strategy: StrategyKind) -> Self {
        self.with_strategies([strategy])
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategies.is_empty() {
            return Err(ConfigError::EmptyStrategies);
        }
        if self.key_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidKeyPrefix(self.key_prefix.clone()));
        }
        Ok(())
    }

    /// Storage key for a strategy and record kind
    pub fn key_for(&self, strategy: &str, kind: &str) -> String {
        format!("{}{}-{}", self.key_prefix, strategy, kind)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No strategy selected
    #[error("No strategies configured")]
    EmptyStrategies,

    /// Key prefix contains whitespace
    #[error("Invalid key prefix: {0:?}")]
    InvalidKeyPrefix(String),

    /// Strategy name not recognized
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}
