//! Common error handling utilities and conventions

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core error types that can be shared across crates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to load configuration: {message}")]
    ConfigLoad { message: String },
}

impl CoreError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a config loading error
    pub fn config_load(message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            message: message.into(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::config_load(err.to_string())
    }
}
