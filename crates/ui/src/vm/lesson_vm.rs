use lesson_core::model::{BlockBody, BlockId, Choice, Correctness};
use lesson_core::session::{BlockView, LessonProjection};

use crate::vm::markdown_vm::HtmlCache;

const DEFAULT_IMAGE_ALT: &str = "Learning content";
pub const TEXTBOX_PLACEHOLDER: &str = "Type your answer...";

/// Colouring of a single multiple-choice option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceState {
    Neutral,
    Selected,
    Correct,
    Wrong,
}

impl ChoiceState {
    /// Once feedback is shown the correct option always lights up, and a
    /// wrong pick is marked on top of that.
    #[must_use]
    pub fn resolve(choice: &Choice, selected: Option<&str>, revealed: bool) -> Self {
        let is_selected = selected == Some(choice.id.as_str());
        if revealed && choice.is_correct {
            Self::Correct
        } else if revealed && is_selected {
            Self::Wrong
        } else if is_selected {
            Self::Selected
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Neutral => "choice",
            Self::Selected => "choice choice--selected",
            Self::Correct => "choice choice--correct",
            Self::Wrong => "choice choice--wrong",
        }
    }
}

/// Border of a free-text answer field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextboxState {
    Editable,
    Locked,
    Correct,
    Wrong,
}

impl TextboxState {
    #[must_use]
    pub fn resolve(revealed: bool, correctness: Option<Correctness>) -> Self {
        if !revealed {
            return Self::Editable;
        }
        match correctness {
            Some(Correctness::Correct) => Self::Correct,
            Some(Correctness::Incorrect) => Self::Wrong,
            Some(Correctness::Unchecked) | None => Self::Locked,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Editable => "textbox",
            Self::Locked => "textbox textbox--locked",
            Self::Correct => "textbox textbox--correct",
            Self::Wrong => "textbox textbox--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: String,
    pub text: String,
    pub state: ChoiceState,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BlockBodyVm {
    ImageWithText {
        image: String,
        alt: String,
        html: String,
    },
    Text {
        html: String,
    },
    MultipleChoice {
        choices: Vec<ChoiceVm>,
        locked: bool,
    },
    Textbox {
        value: String,
        state: TextboxState,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockVm {
    pub id: BlockId,
    pub dom_id: String,
    pub visible: bool,
    pub is_last: bool,
    /// An answer exists and feedback has not been shown yet.
    pub can_check: bool,
    pub body: BlockBodyVm,
}

impl BlockVm {
    #[must_use]
    pub fn from_view(view: &BlockView, html: &mut HtmlCache) -> Self {
        let answer = view.answer.as_ref().map(|a| a.as_str());
        let body = match &view.block.body {
            BlockBody::ImageWithText { image, text, alt } => BlockBodyVm::ImageWithText {
                image: image.clone(),
                alt: alt.clone().unwrap_or_else(|| DEFAULT_IMAGE_ALT.to_string()),
                html: html.render(view.id(), text),
            },
            BlockBody::Text { content } => BlockBodyVm::Text {
                html: html.render(view.id(), content),
            },
            BlockBody::MultipleChoice { choices } => BlockBodyVm::MultipleChoice {
                choices: choices
                    .iter()
                    .map(|choice| ChoiceVm {
                        id: choice.id.clone(),
                        text: choice.text.clone(),
                        state: ChoiceState::resolve(choice, answer, view.revealed),
                    })
                    .collect(),
                locked: view.revealed,
            },
            BlockBody::Textbox { .. } => BlockBodyVm::Textbox {
                value: answer.unwrap_or_default().to_string(),
                state: TextboxState::resolve(view.revealed, view.correctness),
            },
        };

        Self {
            id: view.id(),
            dom_id: block_dom_id(view.id()),
            visible: view.visible,
            is_last: view.is_last,
            can_check: view.block.kind().is_answerable() && answer.is_some() && !view.revealed,
            body,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LessonVm {
    pub blocks: Vec<BlockVm>,
    pub progress: u8,
    pub stars: u32,
    pub message: Option<String>,
}

impl LessonVm {
    #[must_use]
    pub fn from_projection(projection: &LessonProjection) -> Self {
        Self::from_projection_cached(projection, &mut HtmlCache::default())
    }

    /// Maps a projection, reusing html already rendered into `html`.
    #[must_use]
    pub fn from_projection_cached(projection: &LessonProjection, html: &mut HtmlCache) -> Self {
        Self {
            blocks: projection
                .blocks
                .iter()
                .map(|view| BlockVm::from_view(view, html))
                .collect(),
            progress: projection.progress.value(),
            stars: projection.stars.count(),
            message: projection.message.clone(),
        }
    }
}

#[must_use]
pub fn block_dom_id(id: BlockId) -> String {
    format!("lesson-block-{id}")
}

/// Script that brings a block into the middle of the viewport.
#[must_use]
pub fn scroll_into_view_script(id: BlockId) -> String {
    let dom_id = block_dom_id(id);
    format!(
        "document.getElementById({dom_id:?})?.scrollIntoView({{ behavior: 'smooth', block: 'center' }});"
    )
}
