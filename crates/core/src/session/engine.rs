use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    Answer, BlockBody, BlockId, ContentBlock, Correctness, Lesson, LessonSettings,
};
use crate::session::effect::{AnswerReceipt, ContinueOutcome, SessionEffect};
use crate::session::palette::next_kind;
use crate::session::progress::{Progress, STAR_MESSAGE, Stars};
use crate::session::projection::{BlockView, LessonProjection};
use crate::session::visibility::{ScrollTracker, VisibilityState};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one lesson view.
///
/// Blocks are append-only and ids are assigned here (`1..=n`, then
/// `count + 1` per continuation), so ids are unique and never reused.
/// Answer and reveal keys always refer to existing blocks. Progress and stars
/// only grow.
#[derive(Debug, Clone)]
pub struct LessonSession {
    settings: LessonSettings,
    blocks: Vec<ContentBlock>,
    answers: BTreeMap<BlockId, Answer>,
    revealed: BTreeSet<BlockId>,
    progress: Progress,
    stars: Stars,
    message: Option<String>,
    visibility: VisibilityState,
    scroll: ScrollTracker,
    transition_epoch: u64,
    message_epoch: u64,
}

impl LessonSession {
    /// Starts a session over `bodies`, numbering them from 1.
    #[must_use]
    pub fn new(bodies: impl IntoIterator<Item = BlockBody>, settings: LessonSettings) -> Self {
        let blocks = bodies
            .into_iter()
            .enumerate()
            .map(|(index, body)| ContentBlock::new(BlockId::after_count(index), body))
            .collect();

        Self {
            settings,
            blocks,
            answers: BTreeMap::new(),
            revealed: BTreeSet::new(),
            progress: Progress::default(),
            stars: Stars::default(),
            message: None,
            visibility: VisibilityState::default(),
            scroll: ScrollTracker::default(),
            transition_epoch: 0,
            message_epoch: 0,
        }
    }

    #[must_use]
    pub fn from_lesson(lesson: &Lesson, settings: LessonSettings) -> Self {
        Self::new(lesson.bodies().iter().cloned(), settings)
    }

    #[must_use]
    pub fn settings(&self) -> &LessonSettings {
        &self.settings
    }

    #[must_use]
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    #[must_use]
    pub fn answer(&self, id: BlockId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    #[must_use]
    pub fn is_revealed(&self, id: BlockId) -> bool {
        self.revealed.contains(&id)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn stars(&self) -> Stars {
        self.stars
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Records the learner's answer for a block, replacing any earlier one.
    ///
    /// Never fails: unknown ids are reported and dropped.
    pub fn submit_answer(&mut self, block_id: BlockId, answer: impl Into<Answer>) -> AnswerReceipt {
        if self.block(block_id).is_none() {
            return AnswerReceipt::UnknownBlock;
        }
        if self.revealed.contains(&block_id) {
            return AnswerReceipt::Locked;
        }
        let answer = answer.into();
        if self.answers.get(&block_id) == Some(&answer) {
            return AnswerReceipt::Unchanged;
        }
        self.answers.insert(block_id, answer);
        AnswerReceipt::Recorded
    }

    /// Shows correctness feedback for an answered block.
    ///
    /// Returns whether the block's feedback is now shown.
    pub fn reveal(&mut self, block_id: BlockId) -> bool {
        let Some(block) = self.block(block_id) else {
            return false;
        };
        if !block.kind().is_answerable() || !self.answers.contains_key(&block_id) {
            return false;
        }
        self.revealed.insert(block_id);
        true
    }

    //
    // ─── CONTINUATION ──────────────────────────────────────────────────────────
    //

    /// Appends the next placeholder block and advances progress.
    pub fn continue_lesson(&mut self) -> ContinueOutcome {
        let count = self.blocks.len();
        let block_id = BlockId::after_count(count);
        let body = BlockBody::placeholder(next_kind(count));
        self.blocks.push(ContentBlock::new(block_id, body));

        let step = self.progress.advance();
        if step.milestone {
            self.stars.award();
            self.message = Some(STAR_MESSAGE.to_string());
            self.message_epoch += 1;
        }

        self.visibility = VisibilityState::Transitioning;
        self.transition_epoch += 1;

        let mut effects = vec![
            SessionEffect::ScrollTo {
                block: block_id,
                after: self.settings.scroll_delay(),
            },
            SessionEffect::FinishTransition {
                epoch: self.transition_epoch,
                after: self.settings.fade_window(),
            },
        ];
        if step.milestone {
            effects.push(SessionEffect::ClearMessage {
                epoch: self.message_epoch,
                after: self.settings.message_ttl(),
            });
        }

        ContinueOutcome {
            block_id,
            progress: step.after,
            star_awarded: step.milestone,
            effects,
        }
    }

    //
    // ─── TIMER CALLBACKS ───────────────────────────────────────────────────────
    //

    /// Target for a scheduled scroll, or `None` when the block is gone.
    #[must_use]
    pub fn scroll_target(&self, block_id: BlockId) -> Option<BlockId> {
        self.block(block_id).map(|block| block.id)
    }

    /// Ends the transition started by continuation `epoch`.
    ///
    /// A stale epoch (a later continuation restarted the transition) is a
    /// no-op. Returns whether anything changed.
    pub fn finish_transition(&mut self, epoch: u64) -> bool {
        if epoch == self.transition_epoch && self.visibility.is_auto_scrolling() {
            self.visibility = VisibilityState::OnlyLatestVisible;
            self.scroll.settle();
            return true;
        }
        false
    }

    /// Drops the toast set by continuation `epoch`; a newer toast stays.
    /// Returns whether one was cleared.
    pub fn clear_message(&mut self, epoch: u64) -> bool {
        if epoch != self.message_epoch {
            return false;
        }
        self.message.take().is_some()
    }

    //
    // ─── VIEWPORT ──────────────────────────────────────────────────────────────
    //

    /// Feeds a manual scroll offset from the viewport.
    ///
    /// `offset` is the absolute scroll position, including positions reached
    /// by engine-driven scrolls. Upward travel larger than the threshold
    /// brings every block back, unless a continuation is still auto-scrolling.
    pub fn on_manual_scroll(&mut self, offset: f64) -> VisibilityState {
        let travel = self.scroll.record(offset);
        if self.visibility.is_auto_scrolling() {
            return self.visibility;
        }
        if travel < -self.settings.scroll_threshold() {
            self.visibility = VisibilityState::AllVisible;
        }
        self.visibility
    }

    //
    // ─── PROJECTION ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn projection(&self) -> LessonProjection {
        let last_index = self.blocks.len().checked_sub(1);
        let shows_all = self.visibility.shows_all();

        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let is_last = Some(index) == last_index;
                let answer = self.answers.get(&block.id).cloned();
                let revealed = self.revealed.contains(&block.id);
                let correctness = match (&answer, revealed) {
                    (Some(answer), true) => Correctness::evaluate(&block.body, answer),
                    _ => None,
                };
                BlockView {
                    block: block.clone(),
                    visible: shows_all || is_last,
                    is_last,
                    answer,
                    revealed,
                    correctness,
                }
            })
            .collect();

        LessonProjection {
            blocks,
            progress: self.progress,
            stars: self.stars,
            message: self.message.clone(),
            visibility: self.visibility,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockKind, Choice};
    use crate::session::palette::PALETTE;

    fn one_block_session() -> LessonSession {
        LessonSession::new([BlockBody::text("intro")], LessonSettings::standard())
    }

    fn quiz_session() -> LessonSession {
        LessonSession::new(
            [
                BlockBody::text("question"),
                BlockBody::multiple_choice(vec![
                    Choice::new("a", "right", true),
                    Choice::new("b", "wrong", false),
                ]),
                BlockBody::textbox("tokens"),
            ],
            LessonSettings::standard(),
        )
    }

    #[test]
    fn assigns_sequential_ids() {
        let session = quiz_session();
        let ids: Vec<u64> = session.blocks().iter().map(|b| b.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn progress_is_ten_per_continue_clamped() {
        let mut session = one_block_session();
        for n in 1..=15_u32 {
            session.continue_lesson();
            let expected = u8::try_from((10 * n).min(100)).unwrap();
            assert_eq!(session.progress().value(), expected, "after {n} continues");
        }
    }

    #[test]
    fn stars_follow_pre_increment_milestones() {
        let mut session = one_block_session();
        let mut stars = Vec::new();
        for _ in 0..12 {
            session.continue_lesson();
            stars.push(session.stars().count());
        }
        assert_eq!(stars, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn four_continues_from_one_block() {
        let mut session = one_block_session();
        for _ in 0..4 {
            session.continue_lesson();
        }
        assert_eq!(session.blocks().len(), 5);
        assert_eq!(session.progress().value(), 40);
        assert_eq!(session.stars().count(), 1);
        assert_eq!(session.message(), Some(STAR_MESSAGE));
    }

    #[test]
    fn appended_kinds_cycle_from_initial_count() {
        let mut session = quiz_session();
        let initial = session.blocks().len();
        for k in 0..9 {
            let outcome = session.continue_lesson();
            let block = session.block(outcome.block_id).unwrap();
            assert_eq!(block.kind(), PALETTE[(initial + k) % 3]);
        }
    }

    #[test]
    fn appended_ids_are_count_plus_one() {
        let mut session = quiz_session();
        let outcome = session.continue_lesson();
        assert_eq!(outcome.block_id, BlockId::new(4));
        let outcome = session.continue_lesson();
        assert_eq!(outcome.block_id, BlockId::new(5));
    }

    #[test]
    fn continue_requests_scroll_and_transition_end() {
        let mut session = one_block_session();
        let outcome = session.continue_lesson();
        let settings = LessonSettings::standard();
        assert_eq!(
            outcome.effects,
            vec![
                SessionEffect::ScrollTo {
                    block: outcome.block_id,
                    after: settings.scroll_delay(),
                },
                SessionEffect::FinishTransition {
                    epoch: 1,
                    after: settings.fade_window(),
                },
            ]
        );
        assert_eq!(session.visibility(), VisibilityState::Transitioning);
    }

    #[test]
    fn star_continue_also_schedules_message_clear() {
        let mut session = one_block_session();
        for _ in 0..3 {
            assert!(!session.continue_lesson().star_awarded);
        }
        let outcome = session.continue_lesson();
        assert!(outcome.star_awarded);
        assert!(outcome.effects.contains(&SessionEffect::ClearMessage {
            epoch: 1,
            after: LessonSettings::standard().message_ttl(),
        }));
        assert!(session.clear_message(1));
        assert_eq!(session.message(), None);
        assert!(!session.clear_message(1));
    }

    #[test]
    fn second_answer_overwrites() {
        let mut session = quiz_session();
        let id = BlockId::new(2);
        assert_eq!(session.submit_answer(id, "a"), AnswerReceipt::Recorded);
        assert_eq!(session.submit_answer(id, "b"), AnswerReceipt::Recorded);
        let view = session.projection();
        assert_eq!(view.block(id).unwrap().answer, Some(Answer::from("b")));
    }

    #[test]
    fn resubmitting_same_answer_is_unchanged() {
        let mut session = quiz_session();
        let id = BlockId::new(3);
        assert_eq!(session.submit_answer(id, "tok"), AnswerReceipt::Recorded);
        assert_eq!(session.submit_answer(id, "tok"), AnswerReceipt::Unchanged);
        assert_eq!(session.answer(id), Some(&Answer::from("tok")));
    }

    #[test]
    fn unknown_block_answer_is_not_stored() {
        let mut session = quiz_session();
        let ghost = BlockId::new(99);
        assert_eq!(session.submit_answer(ghost, "a"), AnswerReceipt::UnknownBlock);
        assert_eq!(session.answer(ghost), None);
        assert!(session.projection().block(ghost).is_none());
    }

    #[test]
    fn submit_does_not_reveal() {
        let mut session = quiz_session();
        session.submit_answer(BlockId::new(2), "a");
        let view = session.projection();
        let block = view.block(BlockId::new(2)).unwrap();
        assert!(!block.revealed);
        assert_eq!(block.correctness, None);
    }

    #[test]
    fn reveal_requires_answered_answerable_block() {
        let mut session = quiz_session();
        assert!(!session.reveal(BlockId::new(1)), "text block");
        assert!(!session.reveal(BlockId::new(2)), "unanswered");
        assert!(!session.reveal(BlockId::new(42)), "unknown");

        session.submit_answer(BlockId::new(2), "b");
        assert!(session.reveal(BlockId::new(2)));
        let view = session.projection();
        let block = view.block(BlockId::new(2)).unwrap();
        assert!(block.revealed);
        assert_eq!(block.correctness, Some(Correctness::Incorrect));
    }

    #[test]
    fn revealed_block_locks_its_answer() {
        let mut session = quiz_session();
        let id = BlockId::new(2);
        session.submit_answer(id, "a");
        session.reveal(id);
        assert_eq!(session.submit_answer(id, "b"), AnswerReceipt::Locked);
        assert_eq!(session.answer(id), Some(&Answer::from("a")));
    }

    #[test]
    fn revealed_textbox_is_unchecked() {
        let mut session = quiz_session();
        let id = BlockId::new(3);
        session.submit_answer(id, "tokens");
        session.reveal(id);
        let view = session.projection();
        assert_eq!(
            view.block(id).unwrap().correctness,
            Some(Correctness::Unchecked)
        );
    }

    #[test]
    fn projection_is_idempotent() {
        let mut session = quiz_session();
        session.submit_answer(BlockId::new(2), "a");
        session.continue_lesson();
        assert_eq!(session.projection(), session.projection());
    }

    #[test]
    fn only_latest_block_visible_after_continue() {
        let mut session = quiz_session();
        assert!(session.projection().blocks.iter().all(|b| b.visible));

        let outcome = session.continue_lesson();
        let view = session.projection();
        let visible: Vec<BlockId> = view.visible_blocks().map(BlockView::id).collect();
        assert_eq!(visible, vec![outcome.block_id]);
        assert!(view.last_block().unwrap().is_last);
    }

    #[test]
    fn finish_transition_moves_to_only_latest() {
        let mut session = one_block_session();
        assert!(!session.finish_transition(0));
        session.continue_lesson();
        assert!(session.finish_transition(1));
        assert_eq!(session.visibility(), VisibilityState::OnlyLatestVisible);
        assert!(!session.finish_transition(1));
    }

    #[test]
    fn stale_transition_end_is_ignored() {
        let mut session = one_block_session();
        session.continue_lesson();
        session.continue_lesson();
        assert!(!session.finish_transition(1));
        assert_eq!(session.visibility(), VisibilityState::Transitioning);
        assert!(session.finish_transition(2));
    }

    #[test]
    fn stale_message_clear_keeps_newer_toast() {
        let mut session = one_block_session();
        for _ in 0..7 {
            session.continue_lesson();
        }
        assert_eq!(session.stars().count(), 2);
        assert!(!session.clear_message(1));
        assert_eq!(session.message(), Some(STAR_MESSAGE));
        assert!(session.clear_message(2));
    }

    #[test]
    fn manual_scroll_up_reveals_all() {
        let mut session = one_block_session();
        session.on_manual_scroll(400.0);
        session.continue_lesson();
        session.finish_transition(1);

        // Down, then a small jitter up within the threshold.
        session.on_manual_scroll(500.0);
        assert_eq!(
            session.on_manual_scroll(495.0),
            VisibilityState::OnlyLatestVisible
        );

        assert_eq!(session.on_manual_scroll(450.0), VisibilityState::AllVisible);
        assert!(session.projection().blocks.iter().all(|b| b.visible));
    }

    #[test]
    fn slow_scroll_up_after_auto_scroll_reveals_all() {
        let mut session = one_block_session();
        session.on_manual_scroll(0.0);
        session.continue_lesson();
        session.continue_lesson();
        // Engine-driven scroll to the new block while transitioning.
        session.on_manual_scroll(600.0);
        assert!(session.finish_transition(2));

        assert_eq!(
            session.on_manual_scroll(596.0),
            VisibilityState::OnlyLatestVisible
        );
        assert_eq!(
            session.on_manual_scroll(592.0),
            VisibilityState::OnlyLatestVisible
        );
        assert_eq!(session.on_manual_scroll(588.0), VisibilityState::AllVisible);
    }

    #[test]
    fn upward_scroll_during_transition_does_not_carry_over() {
        let mut session = one_block_session();
        session.on_manual_scroll(900.0);
        session.continue_lesson();
        session.on_manual_scroll(700.0);
        session.finish_transition(1);
        assert_eq!(
            session.on_manual_scroll(695.0),
            VisibilityState::OnlyLatestVisible
        );
    }

    #[test]
    fn manual_scroll_ignored_while_transitioning() {
        let mut session = one_block_session();
        session.on_manual_scroll(800.0);
        session.continue_lesson();
        assert_eq!(session.on_manual_scroll(0.0), VisibilityState::Transitioning);
    }

    #[test]
    fn scroll_target_skips_missing_blocks() {
        let session = one_block_session();
        assert_eq!(session.scroll_target(BlockId::new(1)), Some(BlockId::new(1)));
        assert_eq!(session.scroll_target(BlockId::new(2)), None);
    }

    #[test]
    fn empty_session_continues() {
        let mut session = LessonSession::new(Vec::new(), LessonSettings::standard());
        assert!(session.projection().last_block().is_none());
        let outcome = session.continue_lesson();
        assert_eq!(outcome.block_id, BlockId::new(1));
        assert_eq!(session.block(outcome.block_id).unwrap().kind(), BlockKind::Text);
    }
}
