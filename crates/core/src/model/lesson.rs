use thiserror::Error;

use crate::model::block::{BlockBody, BlockError};
use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson title cannot be empty")]
    EmptyTitle,

    #[error("lesson needs at least one block")]
    NoBlocks,

    #[error("block {index} is invalid: {source}")]
    InvalidBlock {
        index: usize,
        #[source]
        source: BlockError,
    },
}

/// Authored lesson content a session starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    bodies: Vec<BlockBody>,
}

impl Lesson {
    /// Creates a validated lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonError` for a blank title, an empty block list, or any
    /// block that fails validation.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        bodies: Vec<BlockBody>,
    ) -> Result<Self, LessonError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LessonError::EmptyTitle);
        }
        if bodies.is_empty() {
            return Err(LessonError::NoBlocks);
        }
        for (index, body) in bodies.iter().enumerate() {
            body.validate()
                .map_err(|source| LessonError::InvalidBlock { index, source })?;
        }
        Ok(Self { id, title, bodies })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn bodies(&self) -> &[BlockBody] {
        &self.bodies
    }
}
