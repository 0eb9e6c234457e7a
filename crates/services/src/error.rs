//! Shared error types for the services crate.

use thiserror::Error;

use lesson_core::model::LessonId;
use storage::repository::StorageError;

/// Errors emitted by `EventService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EventError {
    /// Payload was not `{ "event": string, "data": any }`.
    #[error("Invalid request")]
    InvalidRequest,
    #[error("failed to encode event log: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading lessons.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson {0} not found")]
    NotFound(LessonId),
    #[error("no lessons available")]
    Empty,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Lesson(#[from] LessonServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
