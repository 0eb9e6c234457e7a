use serde::Serialize;

use crate::model::{Answer, BlockId, ContentBlock, Correctness};
use crate::session::progress::{Progress, Stars};
use crate::session::visibility::VisibilityState;

/// Render-ready state of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockView {
    pub block: ContentBlock,
    pub visible: bool,
    pub is_last: bool,
    pub answer: Option<Answer>,
    pub revealed: bool,
    pub correctness: Option<Correctness>,
}

impl BlockView {
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.block.id
    }
}

/// Read-only snapshot of a lesson session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonProjection {
    pub blocks: Vec<BlockView>,
    pub progress: Progress,
    pub stars: Stars,
    pub message: Option<String>,
    pub visibility: VisibilityState,
}

impl LessonProjection {
    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&BlockView> {
        self.blocks.iter().find(|view| view.id() == id)
    }

    #[must_use]
    pub fn last_block(&self) -> Option<&BlockView> {
        self.blocks.last()
    }

    pub fn visible_blocks(&self) -> impl Iterator<Item = &BlockView> {
        self.blocks.iter().filter(|view| view.visible)
    }
}
