//! Structured tool descriptions.
//!
//! The template lists each tool as one opaque line. [`ToolDescription`] is
//! the structured source of that line: a name, a one-sentence purpose, and
//! the activities the tool exposes, each optionally carrying a JSON Schema
//! for its input. Feeding descriptions through
//! [`PromptContext::with_tool`](crate::context::PromptContext::with_tool)
//! keeps `tool_names` and `tools` in correspondence.

use serde::{Deserialize, Serialize};

/// A single activity a tool can execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    /// JSON Schema for the activity's `input`, if it takes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

/// A tool as presented to the model.
///
/// # Example
///
/// ```
/// use cinch_prompt::tools::ToolDescription;
///
/// let tool = ToolDescription::new("search", "Looks things up on the web")
///     .activity("query", "Run a search query");
/// assert_eq!(
///     tool.to_line(),
///     "search: Looks things up on the web Activities: [query: Run a search query]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescription {
    /// Tool name (must be unique within a context).
    pub name: String,
    /// One-sentence purpose.
    pub description: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl ToolDescription {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            activities: Vec::new(),
        }
    }

    /// Add an activity that takes no input.
    pub fn activity(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.activities.push(Activity {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        });
        self
    }

    /// Add an activity whose input schema is derived from a type implementing
    /// `schemars::JsonSchema`, so the schema and the deserialized input type
    /// cannot drift apart.
    pub fn activity_with_input<T: schemars::JsonSchema>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.activities.push(Activity {
            name: name.into(),
            description: description.into(),
            input_schema: Some(crate::json_schema_for::<T>()),
        });
        self
    }

    pub fn find_activity(&self, name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == name)
    }

    /// Render the tool as a single prompt line.
    ///
    /// Embedded newlines are folded to spaces since the template puts one
    /// tool per line.
    pub fn to_line(&self) -> String {
        let mut line = format!("{}: {}", self.name, self.description);
        if !self.activities.is_empty() {
            let activities: Vec<String> = self
                .activities
                .iter()
                .map(|a| format!("{}: {}", a.name, a.description))
                .collect();
            line.push_str(&format!(" Activities: [{}]", activities.join("; ")));
        }
        line.replace(['\r', '\n'], " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;

    #[derive(serde::Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct QueryInput {
        query: String,
    }

    #[test]
    fn line_without_activities() {
        let tool = ToolDescription::new("calculator", "Evaluates arithmetic");
        assert_eq!(tool.to_line(), "calculator: Evaluates arithmetic");
    }

    #[test]
    fn activities_are_listed_in_order() {
        let tool = ToolDescription::new("fs", "File access")
            .activity("read", "Read a file")
            .activity("list", "List a directory");
        assert_eq!(
            tool.to_line(),
            "fs: File access Activities: [read: Read a file; list: List a directory]"
        );
    }

    #[test]
    fn newlines_are_folded() {
        let tool = ToolDescription::new("x", "first\nsecond");
        assert_eq!(tool.to_line(), "x: first second");
    }

    #[test]
    fn typed_activity_input_schema() {
        let tool = ToolDescription::new("search", "Web search")
            .activity_with_input::<QueryInput>("query", "Run a query");
        let schema = tool.find_activity("query").unwrap().input_schema.as_ref().unwrap();
        assert_eq!(schema["type"], "object");
        assert!(schema["required"].as_array().unwrap().contains(&"query".into()));
    }

    #[test]
    fn find_missing_activity() {
        let tool = ToolDescription::new("search", "Web search");
        assert!(tool.find_activity("query").is_none());
    }
}
