//! Rendering configuration.
//!
//! [`PromptConfig`] carries the few knobs a caller can turn when rendering a
//! [`PromptTemplate`](crate::template::PromptTemplate): the missing-field
//! policy and the heading depth used for template subsections.
//!
//! # Examples
//!
//! ```
//! use cinch_prompt::config::{MissingFieldPolicy, PromptConfig};
//!
//! let config = PromptConfig::default()
//!     .with_missing_fields(MissingFieldPolicy::Strict)
//!     .with_heading_level(3);
//! assert!(config.missing_fields.is_strict());
//! assert_eq!(config.heading_prefix(), "###");
//! ```

use serde::{Deserialize, Serialize};

/// What to do when a context field is absent (not merely empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Absent collections default to empty and their sections collapse.
    /// An absent action schema falls back to the built-in [`Action`](crate::action::Action) schema.
    #[default]
    Lenient,
    /// Absent fields fail with [`PromptError::UndefinedInput`](crate::error::PromptError::UndefinedInput).
    Strict,
}

impl MissingFieldPolicy {
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Configuration for rendering a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Missing-field policy. Default: [`MissingFieldPolicy::Lenient`].
    pub missing_fields: MissingFieldPolicy,
    /// Markdown heading level for template subsections. Default: `2`.
    pub heading_level: u8,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            missing_fields: MissingFieldPolicy::Lenient,
            heading_level: 2,
        }
    }
}

impl PromptConfig {
    pub fn with_missing_fields(mut self, policy: MissingFieldPolicy) -> Self {
        self.missing_fields = policy;
        self
    }

    /// Set the heading level. Clamped to `1..=6`.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// The `#` run for the configured heading level, clamped to `1..=6`
    /// since the field may be set directly or deserialized.
    pub fn heading_prefix(&self) -> String {
        "#".repeat(self.heading_level.clamp(1, 6) as usize)
    }
}
