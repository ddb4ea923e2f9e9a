//! Prose and content functions of the toolkit template.
//!
//! [`PromptTemplate::toolkit`](crate::template::PromptTemplate::toolkit)
//! wires these together: the base instructions are the preamble, the tools
//! section is active when tool names are present (with the memory paragraph
//! nested inside it), and the rulesets section is active when rulesets are
//! present.

use crate::action::default_action_schema;
use crate::builder::SystemPromptBuilder;
use crate::config::PromptConfig;
use crate::context::PromptContext;
use crate::error::{PromptError, Result};

pub const TOOLS_SECTION: &str = "tools";
pub const RULESETS_SECTION: &str = "rulesets";

pub const TOOLS_PRIORITY: u32 = 10;
pub const RULESETS_PRIORITY: u32 = 20;

/// Always-present instructions.
pub const BASE_INSTRUCTIONS: &str = "\
You are an expert problem solver. Be truthful and NEVER make up facts. \
If you don't know the answer, say so. Keep your responses concise and to the point.";

const ACTION_FORMAT: &str = "\
You can think step by step and execute actions one at a time to get to your final answer. \
Use the following format:

Thought: <your step-by-step thought process describing what actions you need to use>
Action: <JSON object conforming to the action schema>
Observation: <action result>
...repeat Thought/Action/Observation as many times as you need
Answer: <your final answer>

\"Thought\", \"Action\", \"Observation\", and \"Answer\" MUST ALWAYS start on a new line.";

pub const TOOL_ACTIONS_HEADING: &str = "Actions of Type `tool`";

const TOOL_ACTIONS_INTRO: &str = "\
Use `tool` actions to execute tool activities. The following tools are available:";

const RULESETS_INTRO: &str = "\
When responding, always use rules from the following rulesets. \
Rulesets can override and complement each other:";

/// Opening of the memory paragraph; appears only inside the tools section.
pub const MEMORY_INSTRUCTIONS: &str = "\
Tool activities can store their outputs in memory artifacts. \
To pass data from one tool activity to another, reference a memory artifact namespace";

fn action_schema_block(schema: &str) -> String {
    format!("Each action MUST be a valid JSON object conforming to the following schema:\n\n{schema}")
}

fn tool_access_block(tool_names: &[String]) -> String {
    format!(
        "You have access ONLY to the following tools: [{}]. \
         NEVER make up actions, tool names, or tool activities. \
         If none of the tools can help, answer without them.",
        tool_names.join(", ")
    )
}

fn memory_block(memory_ids: &[String]) -> String {
    format!(
        "{MEMORY_INSTRUCTIONS} from one of the following memories: [{}]. \
         NEVER make up memory names or artifact namespaces.",
        memory_ids.join(", ")
    )
}

/// Tool-usage instructions: action format, schema, offered tools, one line
/// per tool description, and the memory paragraph when memories exist.
///
/// An absent action schema falls back to the built-in schema, or fails
/// under the strict policy.
pub fn tools_section(ctx: &PromptContext, config: &PromptConfig) -> Result<String> {
    let schema = match &ctx.action_schema {
        Some(schema) => schema.clone(),
        None if config.missing_fields.is_strict() => {
            return Err(PromptError::undefined("action_schema"));
        }
        None => default_action_schema(),
    };

    let tool_lines = SystemPromptBuilder::new(TOOL_ACTIONS_INTRO)
        .lines(&ctx.tools)
        .build();

    Ok(SystemPromptBuilder::new(ACTION_FORMAT)
        .heading_level(config.heading_level)
        .raw(action_schema_block(&schema))
        .raw(tool_access_block(&ctx.tool_names))
        .section(TOOL_ACTIONS_HEADING, tool_lines)
        .raw_if(ctx.has_memory(), || memory_block(&ctx.memory_ids))
        .build())
}

/// Ruleset instructions. Each ruleset is introduced by name and its rules
/// are numbered from 1, restarting for every ruleset.
pub fn rulesets_section(ctx: &PromptContext, _config: &PromptConfig) -> Result<String> {
    let mut builder = SystemPromptBuilder::new(RULESETS_INTRO);
    for ruleset in &ctx.rulesets {
        builder = builder
            .raw(format!(
                "Ruleset name: {name}\n\"{name}\" rules:",
                name = ruleset.name
            ))
            .numbered("Rule", ruleset.rules.iter().map(|r| r.value.as_str()));
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissingFieldPolicy;
    use crate::context::Ruleset;

    fn search_ctx() -> PromptContext {
        PromptContext::new()
            .with_action_schema("SCHEMA")
            .with_tool_line("search", "search: looks things up")
    }

    #[test]
    fn tools_section_layout() {
        let text = tools_section(&search_ctx(), &PromptConfig::default()).unwrap();
        assert!(text.starts_with("You can think step by step"));
        assert!(text.contains("conforming to the following schema:\n\nSCHEMA"));
        assert!(text.contains("following tools: [search]."));
        assert!(text.ends_with(
            "## Actions of Type `tool`\n\n\
             Use `tool` actions to execute tool activities. The following tools are available:\n\n\
             search: looks things up"
        ));
    }

    #[test]
    fn memory_paragraph_closes_tools_section() {
        let ctx = search_ctx().with_memory_id("scratch").with_memory_id("notes");
        let text = tools_section(&ctx, &PromptConfig::default()).unwrap();
        assert!(text.ends_with(
            "reference a memory artifact namespace from one of the following memories: \
             [scratch, notes]. NEVER make up memory names or artifact namespaces."
        ));
    }

    #[test]
    fn heading_level_follows_config() {
        let config = PromptConfig::default().with_heading_level(3);
        let text = tools_section(&search_ctx(), &config).unwrap();
        assert!(text.contains("### Actions of Type `tool`"));
    }

    #[test]
    fn absent_schema_uses_builtin_when_lenient() {
        let ctx = PromptContext::new().with_tool_line("search", "search: looks things up");
        let text = tools_section(&ctx, &PromptConfig::default()).unwrap();
        assert!(text.contains(&default_action_schema()));
    }

    #[test]
    fn absent_schema_fails_when_strict() {
        let ctx = PromptContext::new().with_tool_line("search", "search: looks things up");
        let config = PromptConfig::default().with_missing_fields(MissingFieldPolicy::Strict);
        let err = tools_section(&ctx, &config).unwrap_err();
        assert!(matches!(err, PromptError::UndefinedInput { ref field } if field == "action_schema"));
    }

    #[test]
    fn empty_schema_is_inserted_verbatim() {
        let ctx = PromptContext::new()
            .with_action_schema("")
            .with_tool_line("search", "search: looks things up");
        let text = tools_section(&ctx, &PromptConfig::default()).unwrap();
        assert!(text.contains("following schema:\n\n\n\n"));
    }

    #[test]
    fn rulesets_layout() {
        let ctx = PromptContext::new()
            .with_ruleset(Ruleset::new("Style").with_rule("Be concise").with_rule("Be polite"))
            .with_ruleset(Ruleset::new("Tone").with_rule("Be warm"));
        let text = rulesets_section(&ctx, &PromptConfig::default()).unwrap();
        assert_eq!(
            text,
            format!(
                "{RULESETS_INTRO}\n\n\
                 Ruleset name: Style\n\"Style\" rules:\n\n\
                 Rule #1\nBe concise\n\n\
                 Rule #2\nBe polite\n\n\
                 Ruleset name: Tone\n\"Tone\" rules:\n\n\
                 Rule #1\nBe warm"
            )
        );
    }

    #[test]
    fn ruleset_without_rules_keeps_name() {
        let ctx = PromptContext::new().with_ruleset(Ruleset::new("Empty"));
        let text = rulesets_section(&ctx, &PromptConfig::default()).unwrap();
        assert!(text.ends_with("Ruleset name: Empty\n\"Empty\" rules:"));
        assert!(!text.contains("Rule #"));
    }
}
