use std::sync::Arc;

use lesson_core::model::{LessonId, LessonSettings};
use storage::repository::Storage;
use tokio::runtime::Handle;

use crate::Clock;
use crate::error::AppServicesError;
use crate::event_service::EventService;
use crate::lesson_loader::LessonLoader;

/// Assembles app-facing services and resolves a usable lesson id.
#[derive(Clone)]
pub struct AppServices {
    lesson_id: LessonId,
    events: Arc<EventService>,
    lessons: Arc<LessonLoader>,
}

impl AppServices {
    /// Build services over volatile in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if bundled content is invalid or no lesson
    /// is available.
    pub async fn new_in_memory(
        clock: Clock,
        settings: LessonSettings,
        preferred_lesson_id: LessonId,
        handle: Handle,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::in_memory()?;
        Self::from_storage(storage, clock, settings, preferred_lesson_id, handle).await
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if no lesson is available.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        settings: LessonSettings,
        preferred_lesson_id: LessonId,
        handle: Handle,
    ) -> Result<Self, AppServicesError> {
        let events = EventService::new(clock, Arc::clone(&storage.events));
        let lessons = LessonLoader::new(
            Arc::clone(&storage.lessons),
            events.clone(),
            settings,
            handle,
        );
        let lesson_id = lessons.resolve_lesson_id(preferred_lesson_id).await?;

        Ok(Self {
            lesson_id,
            events: Arc::new(events),
            lessons: Arc::new(lessons),
        })
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn events(&self) -> Arc<EventService> {
        Arc::clone(&self.events)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonLoader> {
        Arc::clone(&self.lessons)
    }
}
