use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(eduspace::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(eduspace::config))]
    Config(String),

    #[error("Roster error: {0}")]
    #[diagnostic(code(eduspace::roster))]
    Roster(String),

    #[error("Center not found: {0}")]
    #[diagnostic(code(eduspace::center_not_found))]
    CenterNotFound(String),

    #[error("Insight error: {0}")]
    #[diagnostic(code(eduspace::insight))]
    Insight(String),

    #[error("Component error: {0}")]
    #[diagnostic(code(eduspace::component))]
    Component(String),

    #[error("Render error: {0}")]
    #[diagnostic(code(eduspace::render))]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code(eduspace::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(eduspace::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(eduspace::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create roster errors
pub fn roster_error(message: &str) -> Error {
    Error::Roster(message.to_string())
}

/// Helper to create insight errors
pub fn insight_error(message: &str) -> Error {
    Error::Insight(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}
