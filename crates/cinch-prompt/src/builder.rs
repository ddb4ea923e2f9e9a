//! Block-based prompt builder.
//!
//! [`SystemPromptBuilder`] assembles a prompt from blocks joined by blank
//! lines. Blocks are headed sections, raw text, line lists, or numbered
//! entries. Empty blocks are skipped so conditional content collapses
//! without leaving stray blank lines.

/// Builder for multi-block prompts.
///
/// # Example
///
/// ```
/// use cinch_prompt::builder::SystemPromptBuilder;
///
/// let prompt = SystemPromptBuilder::new("Be truthful.")
///     .section_if(true, "Actions", || "Use tools.".into())
///     .lines(["search: looks things up", "calc: does math"])
///     .numbered("Rule", ["Be concise", "Be polite"])
///     .raw_if(false, || "hidden".into())
///     .build();
///
/// assert_eq!(
///     prompt,
///     "Be truthful.\n\n## Actions\n\nUse tools.\n\n\
///      search: looks things up\ncalc: does math\n\n\
///      Rule #1\nBe concise\n\nRule #2\nBe polite"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SystemPromptBuilder {
    blocks: Vec<String>,
    heading_prefix: String,
}

impl Default for SystemPromptBuilder {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            heading_prefix: "##".to_string(),
        }
    }
}

impl SystemPromptBuilder {
    /// Create a builder whose first block is `preamble` (skipped if empty).
    pub fn new(preamble: impl Into<String>) -> Self {
        Self::default().raw(preamble)
    }

    /// Set the heading level for subsequent `section()` calls.
    /// Level 2 produces `## Heading`. Clamped to `1..=6`.
    pub fn heading_level(mut self, level: u8) -> Self {
        self.heading_prefix = "#".repeat(level.clamp(1, 6) as usize);
        self
    }

    /// Append a headed section. Skipped if `content` is empty.
    pub fn section(mut self, heading: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.blocks
                .push(format!("{} {heading}\n\n{content}", self.heading_prefix));
        }
        self
    }

    /// Conditionally append a headed section.
    ///
    /// The `content_fn` is only called when `condition` is true.
    pub fn section_if(
        self,
        condition: bool,
        heading: &str,
        content_fn: impl FnOnce() -> String,
    ) -> Self {
        if condition {
            self.section(heading, content_fn())
        } else {
            self
        }
    }

    /// Append raw text without a heading. Skipped if empty.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.blocks.push(content);
        }
        self
    }

    /// Conditionally append raw text.
    pub fn raw_if(self, condition: bool, content_fn: impl FnOnce() -> String) -> Self {
        if condition {
            self.raw(content_fn())
        } else {
            self
        }
    }

    /// Append one block with each item on its own line, in order and verbatim.
    /// Skipped if there are no items.
    pub fn lines<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = items
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.raw(joined)
    }

    /// Append one block per item as `"{label} #{n}\n{item}"`, numbering from 1.
    ///
    /// The counter is local to this call, so each call starts again at 1.
    pub fn numbered<I, S>(mut self, label: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, item) in items.into_iter().enumerate() {
            self.blocks
                .push(format!("{label} #{}\n{}", index + 1, item.as_ref()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Join all blocks with blank lines.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}
