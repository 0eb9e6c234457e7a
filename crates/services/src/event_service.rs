use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use storage::repository::{EventLogRepository, EventRecord};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::Clock;
use crate::error::EventError;

/// Wire shape accepted by the event sink.
#[derive(Debug, Deserialize)]
struct EventPayload {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Boundary of the interaction log: stamps, validates and reads events.
///
/// The log lives only as long as the process.
#[derive(Clone)]
pub struct EventService {
    clock: Clock,
    repo: Arc<dyn EventLogRepository>,
}

impl EventService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn EventLogRepository>) -> Self {
        Self { clock, repo }
    }

    /// Append an event stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Storage` if the log rejects the append.
    pub async fn record(
        &self,
        event: impl Into<String>,
        data: Value,
    ) -> Result<EventRecord, EventError> {
        let record = EventRecord::new(self.clock.now(), event, data);
        self.repo.append_event(&record).await?;
        Ok(record)
    }

    /// Start the single task that appends events sent through the returned
    /// writer. The task ends once every clone of the writer is dropped.
    #[must_use]
    pub fn spawn_writer(&self, handle: &Handle) -> EventWriter {
        let (tx, mut rx) = mpsc::unbounded_channel::<EventRecord>();
        let repo = Arc::clone(&self.repo);
        handle.spawn(async move {
            while let Some(record) = rx.recv().await {
                if let Err(err) = repo.append_event(&record).await {
                    tracing::warn!(%err, event = %record.event, "event sink rejected interaction");
                }
            }
        });
        EventWriter {
            clock: self.clock,
            tx,
        }
    }

    /// Append an event from a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidRequest` unless the body is a JSON object
    /// with a string `event`; a missing `data` is stored as `null`.
    pub async fn record_json(&self, body: &str) -> Result<EventRecord, EventError> {
        let payload: EventPayload =
            serde_json::from_str(body).map_err(|_| EventError::InvalidRequest)?;
        self.record(payload.event, payload.data).await
    }

    /// Full log in append order.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Storage` if the log cannot be read.
    pub async fn dump(&self) -> Result<Vec<EventRecord>, EventError> {
        Ok(self.repo.list_events().await?)
    }

    /// Full log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `EventError` if the log cannot be read or encoded.
    pub async fn dump_pretty(&self) -> Result<String, EventError> {
        let events = self.dump().await?;
        Ok(serde_json::to_string_pretty(&events)?)
    }

    /// # Errors
    ///
    /// Returns `EventError::Storage` if the log cannot be cleared.
    pub async fn clear(&self) -> Result<(), EventError> {
        Ok(self.repo.clear_events().await?)
    }
}

/// Fire-and-forget front of the log.
///
/// Records are stamped when sent and appended in send order by one task.
#[derive(Clone)]
pub struct EventWriter {
    clock: Clock,
    tx: mpsc::UnboundedSender<EventRecord>,
}

impl EventWriter {
    pub fn send(&self, event: impl Into<String>, data: Value) {
        let record = EventRecord::new(self.clock.now(), event, data);
        if let Err(mpsc::error::SendError(record)) = self.tx.send(record) {
            tracing::warn!(event = %record.event, "event writer stopped; interaction dropped");
        }
    }
}
