mod answer;
mod block;
mod ids;
mod lesson;
mod settings;

pub use answer::{Answer, Correctness};
pub use block::{BlockBody, BlockError, BlockKind, Choice, ContentBlock};
pub use ids::{BlockId, LessonId, ParseIdError};
pub use lesson::{Lesson, LessonError};
pub use settings::{LessonSettings, SettingsError};
