//! Built-in lesson content shipped with the app.

use lesson_core::model::{BlockBody, Choice, Lesson, LessonError, LessonId};

/// Id of the lesson opened when none is requested.
pub const DEFAULT_LESSON_ID: u64 = 1;

/// "Welcome to Language Models" introduction.
///
/// # Errors
///
/// Returns `LessonError` if the bundled content fails validation.
pub fn language_models_lesson() -> Result<Lesson, LessonError> {
    Lesson::new(
        LessonId::new(DEFAULT_LESSON_ID),
        "Language Models",
        vec![
            BlockBody::image_with_text(
                "/example-image.jpg",
                "# Welcome to Language Models\n\nLet's learn about the technology behind AI!",
            ),
            BlockBody::text(
                "First, let's test your knowledge about language models. \
                 What kind of data was used to train the T&C model?",
            ),
            BlockBody::multiple_choice(vec![
                Choice::new("a", "Terms and conditions agreements", true),
                Choice::new("b", "Travel and culture books", false),
                Choice::new("c", "Town and Country magazines", false),
            ]),
            BlockBody::text(
                "Language models can predict the next word in a sequence. \
                 Which of these predictions makes the most sense?",
            ),
            BlockBody::multiple_choice(vec![
                Choice::new("a", "\"Thanks for the update\" + \"on\"", true),
                Choice::new("b", "\"Thanks for the update\" + \"truck\"", false),
                Choice::new("c", "\"Thanks for the update\" + \"banana\"", false),
            ]),
        ],
    )
}

/// Every bundled lesson.
///
/// # Errors
///
/// Returns `LessonError` if any bundled lesson fails validation.
pub fn bundled_lessons() -> Result<Vec<Lesson>, LessonError> {
    Ok(vec![language_models_lesson()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::model::BlockKind;

    #[test]
    fn bundled_lesson_is_valid_and_ordered() {
        let lesson = language_models_lesson().unwrap();
        let kinds: Vec<BlockKind> = lesson.bodies().iter().map(BlockBody::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::ImageWithText,
                BlockKind::Text,
                BlockKind::MultipleChoice,
                BlockKind::Text,
                BlockKind::MultipleChoice,
            ]
        );
    }
}
