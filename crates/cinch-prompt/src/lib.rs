//! Toolkit system prompt template for tool-using agents.
//!
//! `cinch-prompt` renders the system prompt a tool-using agent runs under:
//! base instructions, a tool-usage block listing the available tools and the
//! JSON action format, an optional memory-artifact paragraph, and optional
//! rulesets with numbered rules. Sections appear only when the inputs that
//! drive them are non-empty.
//!
//! # Getting started
//!
//! ```
//! use cinch_prompt::prelude::*;
//!
//! let ctx = PromptContext::new()
//!     .with_tool(&ToolDescription::new("search", "Looks things up"))
//!     .with_memory_id("scratch")
//!     .with_ruleset(Ruleset::new("Style").with_rule("Be concise"));
//!
//! let prompt = PromptTemplate::toolkit().render(&ctx)?;
//! assert!(prompt.contains("## Actions of Type `tool`"));
//! assert!(prompt.contains("search: Looks things up"));
//! assert!(prompt.contains("Ruleset name: Style"));
//! # Ok::<(), PromptError>(())
//! ```
//!
//! # Where to find things
//!
//! - **Describe the inputs:** [`PromptContext`](context::PromptContext),
//!   [`Ruleset`](context::Ruleset), and
//!   [`ToolDescription`](tools::ToolDescription). Load contexts from JSON
//!   with [`PromptContext::load`](context::PromptContext::load).
//!
//! - **Render:** [`PromptTemplate::toolkit`](template::PromptTemplate::toolkit)
//!   and [`render`](template::render). Add or remove sections with
//!   [`PromptTemplate::register`](template::PromptTemplate::register).
//!
//! - **Check what the model sends back:** [`Action::from_output`](action::Action::from_output)
//!   validates an action against the action schema and the offered tools.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | Render inputs and JSON loading with a missing-field policy |
//! | [`template`] | Conditional, prioritized sections and rendering |
//! | [`sections`] | Toolkit template prose |
//! | [`builder`] | Block-based prompt builder |
//! | [`action`] | Action type, generated schema, validation |
//! | [`tools`] | Structured tool descriptions |
//! | [`conversation`] | Q/A transcripts of prior runs |
//! | [`config`] | Render configuration |
//! | [`error`] | Error type |

pub mod action;
pub mod builder;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod prelude;
pub mod sections;
pub mod template;
pub mod tools;

use schemars::JsonSchema;

pub use error::{PromptError, Result};
pub use template::render;

// Re-export schemars for downstream crates deriving activity input schemas.
pub use schemars;

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`.
///
/// # Example
///
/// ```
/// use cinch_prompt::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct QueryArgs {
///     query: String,
///     #[serde(default)]
///     limit: Option<u32>,
/// }
///
/// let schema = json_schema_for::<QueryArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"query".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
