//! Cancellable one-shot timers owned by a lesson runtime.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Timer slots. Each slot holds at most one pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Scroll,
    Transition,
    Message,
}

/// Owns pending timer tasks.
///
/// Scheduling into an occupied slot aborts the task already there. Dropping
/// `Timers` aborts everything still pending.
pub struct Timers {
    handle: Handle,
    slots: Mutex<HashMap<TimerKind, AbortHandle>>,
}

impl Timers {
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<TimerKind, AbortHandle>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `task` after `after`, replacing any pending task of `kind`.
    pub fn schedule<F>(&self, kind: TimerKind, after: Duration, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(after).await;
            task();
        });
        if let Some(previous) = self.slots().insert(kind, join.abort_handle()) {
            previous.abort();
            tracing::debug!(?kind, "superseded pending timer");
        }
    }

    /// Abort the pending task of `kind`. Returns whether one was pending.
    pub fn cancel(&self, kind: TimerKind) -> bool {
        match self.slots().remove(&kind) {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Abort every pending task.
    pub fn cancel_all(&self) {
        for (_, handle) in self.slots().drain() {
            handle.abort();
        }
    }

    /// Number of tasks that have not fired yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots()
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
