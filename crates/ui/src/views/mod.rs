mod blocks;
mod events;
mod lesson;
mod progress_bar;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use blocks::{ImageWithTextBlock, LessonBlock, MultipleChoiceBlock, TextBlock, TextboxBlock};
pub use events::EventsView;
pub use lesson::LessonView;
pub use progress_bar::ProgressBar;
pub use state::{ViewError, ViewState, view_state_from_resource};
