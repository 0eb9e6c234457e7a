use std::sync::Arc;

use lesson_core::model::{Lesson, LessonId, LessonSettings};
use storage::repository::{LessonRepository, StorageError};
use tokio::runtime::Handle;

use crate::error::LessonServiceError;
use crate::event_service::EventService;
use crate::lesson_runtime::LessonRuntime;
use crate::viewport::Viewport;

/// Catalogue entry for lesson pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    pub blocks: usize,
}

impl LessonSummary {
    fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            title: lesson.title().to_string(),
            blocks: lesson.bodies().len(),
        }
    }
}

/// Opens lessons from the catalogue as live runtimes.
#[derive(Clone)]
pub struct LessonLoader {
    lessons: Arc<dyn LessonRepository>,
    events: EventService,
    settings: LessonSettings,
    handle: Handle,
}

impl LessonLoader {
    #[must_use]
    pub fn new(
        lessons: Arc<dyn LessonRepository>,
        events: EventService,
        settings: LessonSettings,
        handle: Handle,
    ) -> Self {
        Self {
            lessons,
            events,
            settings,
            handle,
        }
    }

    #[must_use]
    pub fn settings(&self) -> LessonSettings {
        self.settings
    }

    /// Fetch a lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` when the id is unknown.
    pub async fn get_lesson(&self, id: LessonId) -> Result<Lesson, LessonServiceError> {
        match self.lessons.get_lesson(id).await {
            Ok(lesson) => Ok(lesson),
            Err(StorageError::NotFound) => Err(LessonServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Start a session for the given lesson.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError` if the lesson cannot be loaded.
    pub async fn start(
        &self,
        id: LessonId,
        viewport: Arc<dyn Viewport>,
    ) -> Result<LessonRuntime, LessonServiceError> {
        let lesson = self.get_lesson(id).await?;
        Ok(LessonRuntime::new(
            &lesson,
            self.settings,
            self.events.clone(),
            viewport,
            self.handle.clone(),
        ))
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError::Storage` if the catalogue cannot be read.
    pub async fn list_lessons(&self) -> Result<Vec<LessonSummary>, LessonServiceError> {
        let lessons = self.lessons.list_lessons().await?;
        Ok(lessons.iter().map(LessonSummary::from_lesson).collect())
    }

    /// Resolve `preferred`, falling back to the first lesson in the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Empty` when the catalogue has no lessons.
    pub async fn resolve_lesson_id(&self, preferred: LessonId) -> Result<LessonId, LessonServiceError> {
        match self.get_lesson(preferred).await {
            Ok(lesson) => return Ok(lesson.id()),
            Err(LessonServiceError::NotFound(_)) => {}
            Err(err) => return Err(err),
        }
        let first = self
            .list_lessons()
            .await?
            .into_iter()
            .next()
            .ok_or(LessonServiceError::Empty)?;
        tracing::info!(requested = %preferred, using = %first.id, "requested lesson missing");
        Ok(first.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;
    use storage::seed::DEFAULT_LESSON_ID;

    use crate::viewport::NoopViewport;

    fn loader(repo: InMemoryRepository) -> LessonLoader {
        let events = EventService::new(fixed_clock(), Arc::new(repo.clone()));
        LessonLoader::new(
            Arc::new(repo),
            events,
            LessonSettings::standard(),
            Handle::current(),
        )
    }

    #[tokio::test]
    async fn starts_bundled_lesson() {
        let loader = loader(InMemoryRepository::seeded().unwrap());
        let runtime = loader
            .start(LessonId::new(DEFAULT_LESSON_ID), Arc::new(NoopViewport))
            .await
            .unwrap();
        let view = runtime.projection();
        assert_eq!(view.blocks.len(), 5);
        assert_eq!(view.progress.value(), 0);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let loader = loader(InMemoryRepository::seeded().unwrap());
        let err = loader
            .start(LessonId::new(77), Arc::new(NoopViewport))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, LessonServiceError::NotFound(id) if id == LessonId::new(77)));
    }

    #[tokio::test]
    async fn resolve_falls_back_to_first_lesson() {
        let loader = loader(InMemoryRepository::seeded().unwrap());
        let id = loader.resolve_lesson_id(LessonId::new(9)).await.unwrap();
        assert_eq!(id, LessonId::new(DEFAULT_LESSON_ID));
    }

    #[tokio::test]
    async fn resolve_on_empty_catalogue_fails() {
        let loader = loader(InMemoryRepository::new());
        let err = loader.resolve_lesson_id(LessonId::new(1)).await.unwrap_err();
        assert!(matches!(err, LessonServiceError::Empty));
    }

    #[tokio::test]
    async fn lists_summaries() {
        let loader = loader(InMemoryRepository::seeded().unwrap());
        let lessons = loader.list_lessons().await.unwrap();
        assert_eq!(
            lessons,
            vec![LessonSummary {
                id: LessonId::new(DEFAULT_LESSON_ID),
                title: "Language Models".into(),
                blocks: 5,
            }]
        );
    }
}
