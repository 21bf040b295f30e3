use serde::{Serialize, Deserialize};
use std::fmt;

/// Unified error type for the assistant core.
/// Persisting operations return Result<T, NeuroError>; read paths fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuroError {
    pub message: String,
    pub stage: String,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl NeuroError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        NeuroError {
            message: message.into(),
            stage: stage.to_string(),
            context: None,
            source: None,
        }
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for NeuroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for NeuroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<toml::de::Error> for NeuroError {
    fn from(err: toml::de::Error) -> Self {
        NeuroError::new(
            format!("TOML error: {}", err),
            "config"
        ).with_source("toml")
    }
}

/// Raised when a string does not name one of the proficiency levels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level '{0}' (expected beginner, intermediate or advanced)")]
pub struct LevelParseError(pub String);
