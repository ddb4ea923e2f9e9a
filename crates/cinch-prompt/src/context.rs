//! Render-time inputs for the toolkit prompt.
//!
//! A [`PromptContext`] supplies the five values the template reads: the
//! action schema, tool names, tool description lines, memory identifiers, and
//! rulesets. Contexts are built in code with the `with_*` methods or loaded
//! from JSON with [`PromptContext::from_json_str`] / [`PromptContext::load`],
//! which apply a [`MissingFieldPolicy`] to absent fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::MissingFieldPolicy;
use crate::error::{PromptError, Result};
use crate::tools::ToolDescription;

/// Field names of a serialized [`PromptContext`], in template order.
pub const CONTEXT_FIELDS: [&str; 5] = [
    "action_schema",
    "tool_names",
    "tools",
    "memory_ids",
    "rulesets",
];

/// A single rule statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub value: String,
}

impl Rule {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A named, ordered collection of rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Ruleset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule. Rules render in the order they are added.
    pub fn with_rule(mut self, value: impl Into<String>) -> Self {
        self.rules.push(Rule::new(value));
        self
    }
}

/// Inputs for rendering a [`PromptTemplate`](crate::template::PromptTemplate).
///
/// `tool_names` and `tools` are expected to correspond entry by entry.
/// [`with_tool`](Self::with_tool) keeps them in step; setting the vectors
/// directly is allowed but a mismatch is logged when loading.
///
/// # Example
///
/// ```
/// use cinch_prompt::context::{PromptContext, Ruleset};
///
/// let ctx = PromptContext::new()
///     .with_tool_line("search", "search: looks things up")
///     .with_memory_id("scratch")
///     .with_ruleset(Ruleset::new("Style").with_rule("Be concise"));
///
/// assert!(ctx.has_tools());
/// assert!(ctx.has_memory());
/// assert_eq!(ctx.rulesets[0].rules.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptContext {
    /// Schema text inserted verbatim into the action instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_schema: Option<String>,
    /// Names of the tools offered to the model. Non-empty enables the tools section.
    pub tool_names: Vec<String>,
    /// One description line per tool, rendered verbatim.
    pub tools: Vec<String>,
    /// Memory identifiers usable for passing artifacts between tools.
    pub memory_ids: Vec<String>,
    /// Rulesets steering the response.
    pub rulesets: Vec<Ruleset>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action_schema(mut self, schema: impl Into<String>) -> Self {
        self.action_schema = Some(schema.into());
        self
    }

    /// Add a tool from its structured description, keeping `tool_names` and
    /// `tools` in correspondence.
    pub fn with_tool(self, tool: &ToolDescription) -> Self {
        self.with_tool_line(tool.name.clone(), tool.to_line())
    }

    /// Add a tool name and its pre-rendered description line.
    pub fn with_tool_line(mut self, name: impl Into<String>, line: impl Into<String>) -> Self {
        self.tool_names.push(name.into());
        self.tools.push(line.into());
        self
    }

    pub fn with_memory_id(mut self, id: impl Into<String>) -> Self {
        self.memory_ids.push(id.into());
        self
    }

    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.rulesets.push(ruleset);
        self
    }

    pub fn has_tools(&self) -> bool {
        !self.tool_names.is_empty()
    }

    pub fn has_memory(&self) -> bool {
        !self.memory_ids.is_empty()
    }

    pub fn has_rulesets(&self) -> bool {
        !self.rulesets.is_empty()
    }

    /// Parse a context from a JSON string under the given policy.
    pub fn from_json_str(json: &str, policy: MissingFieldPolicy) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(PromptError::from_json_error)?;
        Self::from_value(value, policy)
    }

    /// Build a context from an already-parsed JSON value.
    ///
    /// A field counts as absent when its key is missing or its value is
    /// `null`. Under [`MissingFieldPolicy::Lenient`] absent fields take their
    /// defaults; under [`MissingFieldPolicy::Strict`] the first absent field
    /// (in [`CONTEXT_FIELDS`] order) is reported as
    /// [`PromptError::UndefinedInput`].
    ///
    /// A non-string `action_schema` (e.g. the schema given as a JSON object)
    /// is pretty-printed into the opaque schema text.
    pub fn from_value(value: Value, policy: MissingFieldPolicy) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(PromptError::InvalidContext {
                message: "expected a JSON object at the top level".into(),
            });
        };

        for field in CONTEXT_FIELDS {
            if map.get(field).is_none_or(Value::is_null) {
                if policy.is_strict() {
                    return Err(PromptError::undefined(field));
                }
                debug!("context field '{field}' absent, using default");
                map.remove(field);
            }
        }

        if let Some(schema) = map.get_mut("action_schema")
            && !schema.is_string()
        {
            let text = serde_json::to_string_pretty(&*schema).map_err(PromptError::from_json_error)?;
            *schema = Value::String(text);
        }

        let ctx: Self =
            serde_json::from_value(Value::Object(map)).map_err(PromptError::from_json_error)?;
        ctx.warn_on_mismatch();
        Ok(ctx)
    }

    /// Load a context from a JSON file.
    pub fn load(path: &Path, policy: MissingFieldPolicy) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| PromptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ctx = Self::from_json_str(&data, policy)?;
        debug!(
            "Loaded prompt context from {} ({} tools, {} memories, {} rulesets)",
            path.display(),
            ctx.tool_names.len(),
            ctx.memory_ids.len(),
            ctx.rulesets.len()
        );
        Ok(ctx)
    }

    fn warn_on_mismatch(&self) {
        if self.tool_names.len() != self.tools.len() {
            warn!(
                "tool_names has {} entries but tools has {}; tool lines render as given",
                self.tool_names.len(),
                self.tools.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_is_lenient_default() {
        let ctx = PromptContext::from_json_str("{}", MissingFieldPolicy::Lenient).unwrap();
        assert_eq!(ctx, PromptContext::default());
    }

    #[test]
    fn null_fields_are_absent() {
        let ctx = PromptContext::from_value(
            json!({"tool_names": null, "rulesets": null, "tools": ["x"]}),
            MissingFieldPolicy::Lenient,
        )
        .unwrap();
        assert!(ctx.tool_names.is_empty());
        assert!(ctx.rulesets.is_empty());
        assert_eq!(ctx.tools, vec!["x"]);
    }

    #[test]
    fn strict_reports_first_missing_field() {
        let err = PromptContext::from_value(
            json!({"action_schema": "{}", "tool_names": [], "tools": []}),
            MissingFieldPolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::UndefinedInput { ref field } if field == "memory_ids"));
    }

    #[test]
    fn strict_treats_null_as_missing() {
        let err = PromptContext::from_value(
            json!({
                "action_schema": null,
                "tool_names": [],
                "tools": [],
                "memory_ids": [],
                "rulesets": []
            }),
            MissingFieldPolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, PromptError::UndefinedInput { ref field } if field == "action_schema"));
    }

    #[test]
    fn strict_accepts_complete_context() {
        let ctx = PromptContext::from_value(
            json!({
                "action_schema": "schema",
                "tool_names": ["search"],
                "tools": ["search: looks things up"],
                "memory_ids": [],
                "rulesets": [{"name": "Style", "rules": [{"value": "Be concise"}]}]
            }),
            MissingFieldPolicy::Strict,
        )
        .unwrap();
        assert_eq!(ctx.action_schema.as_deref(), Some("schema"));
        assert_eq!(ctx.rulesets[0].rules[0].value, "Be concise");
    }

    #[test]
    fn object_schema_becomes_text() {
        let ctx = PromptContext::from_value(
            json!({"action_schema": {"type": "object"}}),
            MissingFieldPolicy::Lenient,
        )
        .unwrap();
        let schema = ctx.action_schema.unwrap();
        assert!(schema.contains("\"type\": \"object\""));
    }

    #[test]
    fn non_object_is_invalid() {
        let err = PromptContext::from_json_str("[1, 2]", MissingFieldPolicy::Lenient).unwrap_err();
        assert!(matches!(err, PromptError::InvalidContext { .. }));
    }

    #[test]
    fn wrong_shape_is_invalid() {
        let err = PromptContext::from_json_str(r#"{"tools": "search"}"#, MissingFieldPolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, PromptError::InvalidContext { .. }));
    }

    #[test]
    fn ruleset_without_rules_defaults_empty() {
        let ctx = PromptContext::from_json_str(
            r#"{"rulesets": [{"name": "Empty"}]}"#,
            MissingFieldPolicy::Lenient,
        )
        .unwrap();
        assert!(ctx.rulesets[0].rules.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = PromptContext::load(&path, MissingFieldPolicy::Lenient).unwrap_err();
        assert!(matches!(err, PromptError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctx.json");
        std::fs::write(&path, r#"{"memory_ids": ["scratch"]}"#).unwrap();
        let ctx = PromptContext::load(&path, MissingFieldPolicy::Lenient).unwrap();
        assert_eq!(ctx.memory_ids, vec!["scratch"]);
    }

    #[test]
    fn with_tool_line_keeps_correspondence() {
        let ctx = PromptContext::new()
            .with_tool_line("a", "a: first")
            .with_tool_line("b", "b: second");
        assert_eq!(ctx.tool_names, vec!["a", "b"]);
        assert_eq!(ctx.tools, vec!["a: first", "b: second"]);
    }
}
