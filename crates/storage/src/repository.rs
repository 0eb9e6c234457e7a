use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lesson_core::model::{Lesson, LessonId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::seed;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// One logged client interaction.
///
/// `timestamp` is assigned by the sink and serializes as an ISO-8601 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub data: serde_json::Value,
}

impl EventRecord {
    pub fn new(timestamp: DateTime<Utc>, event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            timestamp,
            event: event.into(),
            data,
        }
    }
}

/// Append-only interaction log.
#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Append an event at the end of the log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the event cannot be stored.
    async fn append_event(&self, record: &EventRecord) -> Result<(), StorageError>;

    /// Full log in append order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read.
    async fn list_events(&self) -> Result<Vec<EventRecord>, StorageError>;

    /// Drop every logged event.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be cleared.
    async fn clear_events(&self) -> Result<(), StorageError>;
}

/// Read access to authored lessons.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Fetch a lesson by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, StorageError>;

    /// All lessons ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalogue cannot be read.
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError>;
}

/// Process-local repository.
///
/// Nothing here is persisted: the event log and catalogue start over on every
/// process restart.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    events: Arc<Mutex<Vec<EventRecord>>>,
    lessons: Arc<Mutex<BTreeMap<LessonId, Lesson>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lessons(lessons: impl IntoIterator<Item = Lesson>) -> Self {
        let lessons = lessons
            .into_iter()
            .map(|lesson| (lesson.id(), lesson))
            .collect();
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            lessons: Arc::new(Mutex::new(lessons)),
        }
    }

    /// Repository holding the bundled lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if bundled content is invalid.
    pub fn seeded() -> Result<Self, StorageError> {
        let lessons =
            seed::bundled_lessons().map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self::with_lessons(lessons))
    }
}

#[async_trait]
impl EventLogRepository for InMemoryRepository {
    async fn append_event(&self, record: &EventRecord) -> Result<(), StorageError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, StorageError> {
        let guard = self
            .events
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn clear_events(&self) -> Result<(), StorageError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, StorageError> {
        let guard = self
            .lessons
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub events: Arc<dyn EventLogRepository>,
    pub lessons: Arc<dyn LessonRepository>,
}

impl Storage {
    /// In-memory storage seeded with the bundled lessons.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if bundled content is invalid.
    pub fn in_memory() -> Result<Self, StorageError> {
        let repo = InMemoryRepository::seeded()?;
        let events: Arc<dyn EventLogRepository> = Arc::new(repo.clone());
        let lessons: Arc<dyn LessonRepository> = Arc::new(repo);
        Ok(Self { events, lessons })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::time::fixed_now;
    use serde_json::json;

    #[tokio::test]
    async fn events_keep_append_order() {
        let repo = InMemoryRepository::new();
        for name in ["first", "second", "third"] {
            let record = EventRecord::new(fixed_now(), name, json!({ "n": name }));
            repo.append_event(&record).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_events()
            .await
            .unwrap()
            .into_iter()
            .map(|record| record.event)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let repo = InMemoryRepository::new();
        repo.append_event(&EventRecord::new(fixed_now(), "x", json!(null)))
            .await
            .unwrap();
        repo.clear_events().await.unwrap();
        assert!(repo.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_the_same_log() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.append_event(&EventRecord::new(fixed_now(), "shared", json!(1)))
            .await
            .unwrap();
        assert_eq!(other.list_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_repository_serves_default_lesson() {
        let repo = InMemoryRepository::seeded().unwrap();
        let lesson = repo
            .get_lesson(LessonId::new(seed::DEFAULT_LESSON_ID))
            .await
            .unwrap();
        assert_eq!(lesson.title(), "Language Models");
        assert!(matches!(
            repo.get_lesson(LessonId::new(404)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[test]
    fn record_timestamp_serializes_as_iso_8601() {
        let record = EventRecord::new(fixed_now(), "clicked", json!({ "block": "3" }));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["timestamp"], "2023-11-14T22:13:20Z");
        assert_eq!(value["event"], "clicked");
        assert_eq!(value["data"]["block"], "3");
    }
}
