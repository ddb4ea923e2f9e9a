//! Question/answer transcripts of prior runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One completed exchange: the prompt input and the model's final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRun {
    pub input: String,
    pub output: String,
}

impl ConversationRun {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// An ordered list of runs rendered as alternating `Q:` / `A:` lines.
///
/// # Example
///
/// ```
/// use cinch_prompt::conversation::Conversation;
///
/// let mut conversation = Conversation::default();
/// conversation.push("question 1", "mock output");
/// assert_eq!(conversation.to_string(), "Q: question 1\nA: mock output");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub runs: Vec<ConversationRun>,
}

impl Conversation {
    pub fn new(runs: Vec<ConversationRun>) -> Self {
        Self { runs }
    }

    pub fn push(&mut self, input: impl Into<String>, output: impl Into<String>) {
        self.runs.push(ConversationRun::new(input, output));
    }

    /// Two lines per run, in run order.
    pub fn lines(&self) -> Vec<String> {
        self.runs
            .iter()
            .flat_map(|run| [format!("Q: {}", run.input), format!("A: {}", run.output)])
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
