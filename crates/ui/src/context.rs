use std::sync::Arc;

use lesson_core::model::LessonId;
use services::{EventService, LessonLoader};

pub trait UiApp: Send + Sync {
    fn lesson_id(&self) -> LessonId;

    fn lessons(&self) -> Arc<LessonLoader>;
    fn events(&self) -> Arc<EventService>;
}

#[derive(Clone)]
pub struct AppContext {
    lesson_id: LessonId,
    lessons: Arc<LessonLoader>,
    events: Arc<EventService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            lesson_id: app.lesson_id(),
            lessons: app.lessons(),
            events: app.events(),
        }
    }

    /// Lesson opened on the root route.
    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonLoader> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn events(&self) -> Arc<EventService> {
        Arc::clone(&self.events)
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
