use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lesson_core::model::{Answer, BlockId, Lesson, LessonId, LessonSettings};
use lesson_core::session::{
    AnswerReceipt, ContinueOutcome, LessonProjection, LessonSession, SessionEffect,
    VisibilityState,
};
use serde_json::{Value, json};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::event_service::{EventService, EventWriter};
use crate::timers::{TimerKind, Timers};
use crate::viewport::Viewport;

//
// ─── SHARED STATE ──────────────────────────────────────────────────────────────
//

/// State reachable from timer tasks.
struct Shared {
    lesson_id: LessonId,
    session: Mutex<LessonSession>,
    updates: watch::Sender<LessonProjection>,
    events: EventWriter,
    viewport: Arc<dyn Viewport>,
}

impl Shared {
    fn session(&self) -> MutexGuard<'_, LessonSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, session: &LessonSession) {
        self.updates.send_replace(session.projection());
    }

    /// Log an interaction without waiting for the sink.
    fn log(&self, event: &'static str, data: Value) {
        self.events.send(event, data);
    }

    fn fire_scroll(&self, block: BlockId) {
        let target = self.session().scroll_target(block);
        match target {
            Some(block) => self.viewport.scroll_into_view(block),
            None => tracing::debug!(%block, "scroll target missing; skipped"),
        }
    }

    fn fire_transition_end(&self, epoch: u64) {
        let mut session = self.session();
        if session.finish_transition(epoch) {
            tracing::debug!(epoch, "visibility transition finished");
            self.publish(&session);
        }
    }

    fn fire_message_clear(&self, epoch: u64) {
        let mut session = self.session();
        if session.clear_message(epoch) {
            self.publish(&session);
        }
    }
}

//
// ─── RUNTIME ───────────────────────────────────────────────────────────────────
//

/// Live lesson session: the engine plus its timers, event logging and
/// change notifications.
///
/// Every mutation publishes a fresh `LessonProjection` to subscribers.
/// Dropping the runtime (or calling `shutdown`) cancels pending timers so
/// nothing touches the session after teardown.
pub struct LessonRuntime {
    shared: Arc<Shared>,
    timers: Timers,
}

impl LessonRuntime {
    /// Start a session over `lesson`. Timers and event logging run on `handle`.
    #[must_use]
    pub fn new(
        lesson: &Lesson,
        settings: LessonSettings,
        events: EventService,
        viewport: Arc<dyn Viewport>,
        handle: Handle,
    ) -> Self {
        let session = LessonSession::from_lesson(lesson, settings);
        let (updates, _) = watch::channel(session.projection());
        let shared = Arc::new(Shared {
            lesson_id: lesson.id(),
            session: Mutex::new(session),
            updates,
            events: events.spawn_writer(&handle),
            viewport,
        });

        tracing::info!(lesson_id = %lesson.id(), blocks = lesson.bodies().len(), "lesson started");
        shared.log(
            "lesson_started",
            json!({ "lessonId": lesson.id().value(), "title": lesson.title() }),
        );

        Self {
            shared,
            timers: Timers::new(handle),
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.shared.lesson_id
    }

    #[must_use]
    pub fn projection(&self) -> LessonProjection {
        self.shared.session().projection()
    }

    /// Receiver that yields the latest projection after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LessonProjection> {
        self.shared.updates.subscribe()
    }

    pub fn submit_answer(&self, block_id: BlockId, answer: impl Into<Answer>) -> AnswerReceipt {
        let answer = answer.into();
        let receipt = self.store_answer(block_id, answer.clone());
        match receipt {
            AnswerReceipt::Recorded => self.shared.log(
                "answer_submitted",
                json!({ "blockId": block_id, "answer": answer }),
            ),
            AnswerReceipt::UnknownBlock => {
                tracing::debug!(%block_id, "answer for unknown block ignored");
            }
            AnswerReceipt::Unchanged | AnswerReceipt::Locked => {}
        }
        receipt
    }

    /// Store in-progress text for a block without logging it. The final
    /// text is logged when the answer is revealed.
    pub fn draft_answer(&self, block_id: BlockId, answer: impl Into<Answer>) -> AnswerReceipt {
        let receipt = self.store_answer(block_id, answer.into());
        if receipt == AnswerReceipt::UnknownBlock {
            tracing::debug!(%block_id, "draft for unknown block ignored");
        }
        receipt
    }

    /// Show correctness feedback for an answered block.
    pub fn reveal(&self, block_id: BlockId) -> bool {
        let (answer, correctness) = {
            let mut session = self.shared.session();
            if !session.reveal(block_id) {
                return false;
            }
            self.shared.publish(&session);
            session
                .projection()
                .block(block_id)
                .map(|view| (view.answer.clone(), view.correctness))
                .unwrap_or_default()
        };
        self.shared.log(
            "answer_revealed",
            json!({ "blockId": block_id, "answer": answer, "correctness": correctness }),
        );
        true
    }

    /// Append the next block, advance progress and schedule the follow-up
    /// scroll, transition end and toast expiry.
    pub fn continue_lesson(&self) -> ContinueOutcome {
        let (outcome, stars, kind) = {
            let mut session = self.shared.session();
            let outcome = session.continue_lesson();
            self.shared.publish(&session);
            let kind = session
                .block(outcome.block_id)
                .map(|block| block.kind().as_str());
            (outcome, session.stars().count(), kind)
        };

        for effect in &outcome.effects {
            self.schedule(*effect);
        }

        tracing::debug!(
            block_id = %outcome.block_id,
            progress = outcome.progress.value(),
            "lesson continued"
        );
        self.shared.log(
            "block_appended",
            json!({
                "blockId": outcome.block_id,
                "type": kind,
                "progress": outcome.progress.value(),
            }),
        );
        if outcome.star_awarded {
            tracing::info!(stars, "star awarded");
            self.shared.log("star_awarded", json!({ "stars": stars }));
        }
        outcome
    }

    /// Feed a manual scroll offset from the viewport.
    pub fn on_manual_scroll(&self, offset: f64) -> VisibilityState {
        let mut session = self.shared.session();
        let before = session.visibility();
        let after = session.on_manual_scroll(offset);
        if before != after {
            tracing::debug!(?before, ?after, "visibility changed by scroll");
            self.shared.publish(&session);
        }
        after
    }

    /// Cancel every pending timer. The session stays readable.
    pub fn shutdown(&self) {
        self.timers.cancel_all();
        tracing::info!(lesson_id = %self.shared.lesson_id, "lesson runtime shut down");
    }

    /// Timers that have not fired yet.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    fn store_answer(&self, block_id: BlockId, answer: Answer) -> AnswerReceipt {
        let mut session = self.shared.session();
        let receipt = session.submit_answer(block_id, answer);
        if receipt.changed_state() {
            self.shared.publish(&session);
        }
        receipt
    }

    fn schedule(&self, effect: SessionEffect) {
        let shared = Arc::clone(&self.shared);
        match effect {
            SessionEffect::ScrollTo { block, after } => {
                self.timers
                    .schedule(TimerKind::Scroll, after, move || shared.fire_scroll(block));
            }
            SessionEffect::FinishTransition { epoch, after } => {
                self.timers.schedule(TimerKind::Transition, after, move || {
                    shared.fire_transition_end(epoch);
                });
            }
            SessionEffect::ClearMessage { epoch, after } => {
                self.timers.schedule(TimerKind::Message, after, move || {
                    shared.fire_message_clear(epoch);
                });
            }
        }
    }
}
