mod effect;
mod engine;
mod palette;
mod progress;
mod projection;
mod visibility;

// Public API of the lesson session engine.
pub use effect::{AnswerReceipt, ContinueOutcome, SessionEffect};
pub use engine::LessonSession;
pub use palette::{PALETTE, next_kind};
pub use progress::{
    PROGRESS_CEILING, PROGRESS_STEP, Progress, ProgressStep, STAR_MESSAGE, STAR_MILESTONES, Stars,
};
pub use projection::{BlockView, LessonProjection};
pub use visibility::VisibilityState;
