use std::time::Duration;

use crate::model::BlockId;
use crate::session::progress::Progress;

/// Deferred work requested by the engine. The host schedules each effect
/// after its delay and calls back into the session when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// Ask the viewport to bring `block` into view.
    ScrollTo { block: BlockId, after: Duration },
    /// End the visibility transition started by continuation `epoch`.
    FinishTransition { epoch: u64, after: Duration },
    /// Drop the toast set by continuation `epoch`.
    ClearMessage { epoch: u64, after: Duration },
}

impl SessionEffect {
    #[must_use]
    pub fn delay(&self) -> Duration {
        match self {
            SessionEffect::ScrollTo { after, .. }
            | SessionEffect::FinishTransition { after, .. }
            | SessionEffect::ClearMessage { after, .. } => *after,
        }
    }
}

/// What a continuation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueOutcome {
    pub block_id: BlockId,
    pub progress: Progress,
    pub star_awarded: bool,
    pub effects: Vec<SessionEffect>,
}

/// How `submit_answer` treated a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerReceipt {
    /// New or changed value stored.
    Recorded,
    /// Same value already stored.
    Unchanged,
    /// Correctness is already shown for this block; input is closed.
    Locked,
    /// No block with this id; nothing stored.
    UnknownBlock,
}

impl AnswerReceipt {
    #[must_use]
    pub fn changed_state(self) -> bool {
        matches!(self, AnswerReceipt::Recorded)
    }
}
