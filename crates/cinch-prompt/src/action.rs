//! Actions emitted by the model and the schema that describes them.
//!
//! The toolkit prompt asks the model to emit each tool invocation as a JSON
//! object on an `Action:` line. [`Action`] is that object; its JSON Schema,
//! generated with `schemars`, is the default action schema inserted into the
//! prompt. [`Action::parse`] and [`Action::from_output`] check a model's
//! action against the schema with `jsonschema` and against the tools the
//! prompt actually offered.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PromptError, Result};
use crate::tools::ToolDescription;

/// Line markers of the Thought/Action/Observation format.
const ACTION_MARKER: &str = "Action:";
const FOLLOWING_MARKERS: [&str; 3] = ["Observation:", "Thought:", "Answer:"];

/// The kind of action. Only tool actions exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Tool,
}

/// A single tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Action {
    /// Action type.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Name of the tool to use.
    pub name: String,
    /// Tool activity to execute.
    pub activity: String,
    /// Activity input, when the activity takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// JSON Schema for [`Action`].
pub fn action_schema() -> Value {
    crate::json_schema_for::<Action>()
}

/// The action schema as pretty-printed text, ready for prompt insertion.
pub fn default_action_schema() -> String {
    let schema = action_schema();
    serde_json::to_string_pretty(&schema).unwrap_or_else(|_| schema.to_string())
}

impl Action {
    pub fn tool(name: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Tool,
            name: name.into(),
            activity: activity.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    /// Parse a JSON action and check it against the action schema and the
    /// offered tool names.
    ///
    /// Schema violations are reported together, one per instance path, so the
    /// message can be fed back to the model for self-correction.
    pub fn parse(json: &str, tool_names: &[String]) -> Result<Self> {
        let value: Value = serde_json::from_str(json.trim()).map_err(|e| PromptError::InvalidAction {
            message: format!("action is not valid JSON: {e}"),
        })?;

        let errors = schema_errors(&action_schema(), &value);
        if !errors.is_empty() {
            return Err(PromptError::InvalidAction {
                message: format!("action does not match the schema:\n{}", errors.join("\n")),
            });
        }

        let action: Action = serde_json::from_value(value).map_err(|e| PromptError::InvalidAction {
            message: e.to_string(),
        })?;

        if !tool_names.iter().any(|n| *n == action.name) {
            return Err(PromptError::UnknownTool {
                name: action.name,
                available: tool_names.join(", "),
            });
        }

        debug!("[action] {}.{}", action.name, action.activity);
        Ok(action)
    }

    /// Extract the last `Action:` entry from a model response and parse it.
    ///
    /// The entry starts at the last line beginning with `Action:`; the marker
    /// inside JSON strings is ignored. The JSON may span several lines and
    /// ends at the next `Observation:`, `Thought:`, or `Answer:` line.
    pub fn from_output(text: &str, tool_names: &[String]) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let Some(start) = lines
            .iter()
            .rposition(|line| line.trim_start().starts_with(ACTION_MARKER))
        else {
            return Err(PromptError::InvalidAction {
                message: format!("no `{ACTION_MARKER}` line in model output"),
            });
        };

        let first = lines[start]
            .trim_start()
            .strip_prefix(ACTION_MARKER)
            .unwrap_or_default();
        let json = std::iter::once(first)
            .chain(lines[start + 1..].iter().copied().take_while(|line| {
                let line = line.trim_start();
                !FOLLOWING_MARKERS.iter().any(|m| line.starts_with(m))
            }))
            .collect::<Vec<_>>()
            .join("\n");

        Self::parse(&json, tool_names)
    }

    /// Parse either a bare JSON action or a model response containing an
    /// `Action:` line. Text starting with `{` is treated as bare JSON.
    pub fn from_text(text: &str, tool_names: &[String]) -> Result<Self> {
        if text.trim_start().starts_with('{') {
            Self::parse(text, tool_names)
        } else {
            Self::from_output(text, tool_names)
        }
    }

    /// Check the action's activity and input against a tool's description.
    ///
    /// A missing `input` is validated as `null`. Activities without an input
    /// schema accept anything.
    pub fn validate_against(&self, tool: &ToolDescription) -> Result<()> {
        let Some(activity) = tool.find_activity(&self.activity) else {
            return Err(PromptError::InvalidAction {
                message: format!("tool '{}' has no activity '{}'", tool.name, self.activity),
            });
        };

        let Some(schema) = &activity.input_schema else {
            return Ok(());
        };

        let input = self.input.clone().unwrap_or(Value::Null);
        let errors = schema_errors(schema, &input);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PromptError::InvalidAction {
                message: format!(
                    "input for '{}.{}' does not match its schema:\n{}",
                    tool.name,
                    activity.name,
                    errors.join("\n")
                ),
            })
        }
    }
}

/// Validate `instance` against `schema`, returning one line per violation.
///
/// An invalid schema skips validation.
fn schema_errors(schema: &Value, instance: &Value) -> Vec<String> {
    let validator = match jsonschema::validator_for(schema) {
        Ok(v) => v,
        Err(e) => {
            warn!("skipping validation, schema is invalid: {e}");
            return Vec::new();
        }
    };

    validator
        .iter_errors(instance)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect()
}
