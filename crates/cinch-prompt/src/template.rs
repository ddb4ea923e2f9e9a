//! Named, conditional prompt sections and rendering.
//!
//! A [`PromptTemplate`] is a preamble plus [`PromptSection`]s. Each section
//! has a condition over the [`PromptContext`] and a content function; when
//! rendering, active sections are ordered by priority and joined with blank
//! lines. [`PromptTemplate::toolkit`] is the toolkit system prompt.

use tracing::{debug, trace};

use crate::builder::SystemPromptBuilder;
use crate::config::PromptConfig;
use crate::context::PromptContext;
use crate::error::Result;
use crate::sections;

/// Decides whether a section is included for a context.
pub type SectionCondition = Box<dyn Fn(&PromptContext) -> bool + Send + Sync>;

/// Produces a section body. Errors abort the whole render.
pub type SectionContent =
    Box<dyn Fn(&PromptContext, &PromptConfig) -> Result<String> + Send + Sync>;

/// A named prompt section with a condition and content generator.
pub struct PromptSection {
    /// Unique name (registering the same name again replaces the section).
    pub name: String,
    /// Section heading. Empty string = raw content.
    pub heading: String,
    /// Lower renders earlier. Ties keep registration order.
    pub priority: u32,
    pub condition: SectionCondition,
    pub content: SectionContent,
}

impl std::fmt::Debug for PromptSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptSection")
            .field("name", &self.name)
            .field("heading", &self.heading)
            .field("priority", &self.priority)
            .finish()
    }
}

/// A prompt template: preamble, conditional sections, and render config.
///
/// # Example
///
/// ```
/// use cinch_prompt::context::{PromptContext, Ruleset};
/// use cinch_prompt::template::PromptTemplate;
///
/// let template = PromptTemplate::toolkit();
/// let ctx = PromptContext::new()
///     .with_action_schema("{}")
///     .with_tool_line("search", "search: looks things up")
///     .with_ruleset(Ruleset::new("Style").with_rule("Be concise"));
///
/// let prompt = template.render(&ctx).unwrap();
/// assert!(prompt.contains("search: looks things up"));
/// assert!(prompt.contains("Rule #1\nBe concise"));
/// ```
#[derive(Debug)]
pub struct PromptTemplate {
    preamble: String,
    sections: Vec<PromptSection>,
    config: PromptConfig,
}

impl PromptTemplate {
    /// Create an empty template with a preamble.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            sections: Vec::new(),
            config: PromptConfig::default(),
        }
    }

    /// The toolkit system prompt: base instructions, the tools section
    /// (active when `tool_names` is non-empty), and the rulesets section
    /// (active when `rulesets` is non-empty).
    pub fn toolkit() -> Self {
        let mut template = Self::new(sections::BASE_INSTRUCTIONS);
        template.register(
            sections::TOOLS_SECTION,
            "",
            sections::TOOLS_PRIORITY,
            PromptContext::has_tools,
            sections::tools_section,
        );
        template.register(
            sections::RULESETS_SECTION,
            "",
            sections::RULESETS_PRIORITY,
            PromptContext::has_rulesets,
            sections::rulesets_section,
        );
        template
    }

    pub fn with_config(mut self, config: PromptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Register a section, replacing any section with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        heading: impl Into<String>,
        priority: u32,
        condition: impl Fn(&PromptContext) -> bool + Send + Sync + 'static,
        content: impl Fn(&PromptContext, &PromptConfig) -> Result<String> + Send + Sync + 'static,
    ) {
        let name = name.into();
        self.sections.retain(|s| s.name != name);
        self.sections.push(PromptSection {
            name,
            heading: heading.into(),
            priority,
            condition: Box::new(condition),
            content: Box::new(content),
        });
    }

    /// Remove a section by name. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Section names in render order.
    pub fn section_names(&self) -> Vec<&str> {
        let mut ordered: Vec<&PromptSection> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.priority);
        ordered.into_iter().map(|s| s.name.as_str()).collect()
    }

    /// Render the template for a context.
    ///
    /// Sections whose condition is false are skipped without calling their
    /// content function. Empty content is skipped. The first content error
    /// aborts rendering; no partial output is returned.
    pub fn render(&self, ctx: &PromptContext) -> Result<String> {
        let mut builder =
            SystemPromptBuilder::new(self.preamble.as_str()).heading_level(self.config.heading_level);

        let mut active: Vec<&PromptSection> =
            self.sections.iter().filter(|s| (s.condition)(ctx)).collect();
        active.sort_by_key(|s| s.priority);

        let mut rendered = Vec::with_capacity(active.len());
        for section in active {
            let content = (section.content)(ctx, &self.config)?;
            if content.is_empty() {
                trace!("section '{}' produced no content", section.name);
                continue;
            }
            rendered.push(section.name.as_str());
            builder = if section.heading.is_empty() {
                builder.raw(content)
            } else {
                builder.section(&section.heading, content)
            };
        }

        let prompt = builder.build();
        debug!(
            "Rendered prompt: {} bytes, sections [{}]",
            prompt.len(),
            rendered.join(", ")
        );
        Ok(prompt)
    }
}

/// Render `template` with `ctx`. Equivalent to [`PromptTemplate::render`].
pub fn render(template: &PromptTemplate, ctx: &PromptContext) -> Result<String> {
    template.render(ctx)
}
