//! Convenience re-exports for common `cinch-prompt` types.
//!
//! ```ignore
//! use cinch_prompt::prelude::*;
//! ```

pub use crate::action::{Action, ActionKind, default_action_schema};
pub use crate::builder::SystemPromptBuilder;
pub use crate::config::{MissingFieldPolicy, PromptConfig};
pub use crate::context::{PromptContext, Rule, Ruleset};
pub use crate::conversation::{Conversation, ConversationRun};
pub use crate::error::PromptError;
pub use crate::template::{PromptTemplate, render};
pub use crate::tools::ToolDescription;
