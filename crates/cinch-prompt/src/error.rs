//! Error types for context loading, rendering, and action parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for prompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors that can occur while loading a context, rendering a template, or
/// parsing an action emitted by the model.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A context field is absent and the strict missing-field policy is active.
    #[error("undefined input: `{field}` is missing from the prompt context")]
    UndefinedInput { field: String },

    /// The context JSON is malformed or has the wrong shape.
    #[error("invalid prompt context: {message}")]
    InvalidContext { message: String },

    /// Reading a context file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An action is not valid JSON or violates the action schema.
    #[error("invalid action: {message}")]
    InvalidAction { message: String },

    /// An action names a tool that is not offered to the model.
    #[error("unknown tool '{name}'; available tools: [{available}]")]
    UnknownTool { name: String, available: String },
}

impl PromptError {
    pub fn undefined(field: impl Into<String>) -> Self {
        Self::UndefinedInput {
            field: field.into(),
        }
    }

    /// Build an [`InvalidContext`](Self::InvalidContext) error from a serde error.
    /// serde's message already carries the line and column.
    pub fn from_json_error(err: serde_json::Error) -> Self {
        Self::InvalidContext {
            message: err.to_string(),
        }
    }
}
