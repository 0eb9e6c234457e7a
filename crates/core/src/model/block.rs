use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::BlockId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlockError {
    #[error("image reference cannot be empty")]
    EmptyImage,

    #[error("markdown body cannot be empty")]
    EmptyText,

    #[error("multiple choice block needs at least one choice")]
    NoChoices,

    #[error("choice text cannot be empty (choice {0})")]
    EmptyChoice(String),

    #[error("duplicate choice id: {0}")]
    DuplicateChoice(String),

    #[error("multiple choice block needs exactly one correct choice, found {0}")]
    CorrectChoiceCount(usize),
}

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

/// Type tag of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    ImageWithText,
    Text,
    MultipleChoice,
    Textbox,
}

impl BlockKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::ImageWithText => "image_with_text",
            BlockKind::Text => "text",
            BlockKind::MultipleChoice => "multiple_choice",
            BlockKind::Textbox => "textbox",
        }
    }

    /// Whether the learner can submit an answer to blocks of this kind.
    #[must_use]
    pub fn is_answerable(self) -> bool {
        match self {
            BlockKind::MultipleChoice | BlockKind::Textbox => true,
            BlockKind::ImageWithText | BlockKind::Text => false,
        }
    }
}

//
// ─── BODY ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

impl Choice {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Content of a block, without its session-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockBody {
    ImageWithText {
        image: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Text {
        content: String,
    },
    MultipleChoice {
        choices: Vec<Choice>,
    },
    Textbox {
        answer: String,
    },
}

impl BlockBody {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn image_with_text(image: impl Into<String>, text: impl Into<String>) -> Self {
        Self::ImageWithText {
            image: image.into(),
            text: text.into(),
            alt: None,
        }
    }

    #[must_use]
    pub fn multiple_choice(choices: Vec<Choice>) -> Self {
        Self::MultipleChoice { choices }
    }

    pub fn textbox(answer: impl Into<String>) -> Self {
        Self::Textbox {
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockBody::ImageWithText { .. } => BlockKind::ImageWithText,
            BlockBody::Text { .. } => BlockKind::Text,
            BlockBody::MultipleChoice { .. } => BlockKind::MultipleChoice,
            BlockBody::Textbox { .. } => BlockKind::Textbox,
        }
    }

    /// Placeholder content appended by a continuation.
    #[must_use]
    pub fn placeholder(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => Self::text("Let's explore this concept further..."),
            BlockKind::MultipleChoice => Self::multiple_choice(vec![
                Choice::new("a", "This is the correct answer", true),
                Choice::new("b", "This is incorrect", false),
                Choice::new("c", "This is also incorrect", false),
            ]),
            BlockKind::ImageWithText => Self::image_with_text(
                "/example-image.jpg",
                "## New Concept\n\nHere's an illustration of how this works.",
            ),
            BlockKind::Textbox => Self::textbox(""),
        }
    }

    /// Checks authored content.
    ///
    /// # Errors
    ///
    /// Returns `BlockError` when a body is blank or a multiple choice block
    /// does not have exactly one correct, uniquely identified choice.
    pub fn validate(&self) -> Result<(), BlockError> {
        match self {
            BlockBody::ImageWithText { image, text, .. } => {
                if image.trim().is_empty() {
                    return Err(BlockError::EmptyImage);
                }
                if text.trim().is_empty() {
                    return Err(BlockError::EmptyText);
                }
                Ok(())
            }
            BlockBody::Text { content } => {
                if content.trim().is_empty() {
                    return Err(BlockError::EmptyText);
                }
                Ok(())
            }
            BlockBody::MultipleChoice { choices } => validate_choices(choices),
            BlockBody::Textbox { .. } => Ok(()),
        }
    }

    /// Looks up a choice of a multiple choice block.
    #[must_use]
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        match self {
            BlockBody::MultipleChoice { choices } => {
                choices.iter().find(|choice| choice.id == choice_id)
            }
            BlockBody::ImageWithText { .. } | BlockBody::Text { .. } | BlockBody::Textbox { .. } => {
                None
            }
        }
    }
}

fn validate_choices(choices: &[Choice]) -> Result<(), BlockError> {
    if choices.is_empty() {
        return Err(BlockError::NoChoices);
    }
    let mut seen = HashSet::new();
    for choice in choices {
        if choice.text.trim().is_empty() {
            return Err(BlockError::EmptyChoice(choice.id.clone()));
        }
        if !seen.insert(choice.id.as_str()) {
            return Err(BlockError::DuplicateChoice(choice.id.clone()));
        }
    }
    let correct = choices.iter().filter(|choice| choice.is_correct).count();
    if correct != 1 {
        return Err(BlockError::CorrectChoiceCount(correct));
    }
    Ok(())
}

//
// ─── BLOCK ─────────────────────────────────────────────────────────────────────
//

/// One unit of lesson material as held by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(flatten)]
    pub body: BlockBody,
}

impl ContentBlock {
    #[must_use]
    pub fn new(id: BlockId, body: BlockBody) -> Self {
        Self { id, body }
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        self.body.kind()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
