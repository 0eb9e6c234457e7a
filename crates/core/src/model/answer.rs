use serde::{Deserialize, Serialize};

use crate::model::block::BlockBody;

/// Learner-submitted value for a block: a choice id or free text, depending
/// on the block it was submitted for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answer(String);

impl Answer {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Outcome of checking an answer against its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correctness {
    Correct,
    Incorrect,
    /// Free-text answers carry an expected value but are never compared.
    Unchecked,
}

impl Correctness {
    /// Evaluates `answer` for `body`.
    ///
    /// Returns `None` for blocks that take no answer.
    #[must_use]
    pub fn evaluate(body: &BlockBody, answer: &Answer) -> Option<Self> {
        match body {
            BlockBody::MultipleChoice { .. } => Some(
                if body.choice(answer.as_str()).is_some_and(|c| c.is_correct) {
                    Correctness::Correct
                } else {
                    Correctness::Incorrect
                },
            ),
            // TODO: decide on trimmed / case-insensitive comparison before checking textbox answers.
            BlockBody::Textbox { .. } => Some(Correctness::Unchecked),
            BlockBody::ImageWithText { .. } | BlockBody::Text { .. } => None,
        }
    }
}
