use serde::Serialize;

/// Progress added by every continuation.
pub const PROGRESS_STEP: u8 = 10;
/// Progress never exceeds this value.
pub const PROGRESS_CEILING: u8 = 100;
/// Pre-increment progress values that award a star.
pub const STAR_MILESTONES: [u8; 3] = [30, 60, 90];
/// Toast shown when a star is awarded.
pub const STAR_MESSAGE: &str = "You earned a star! 🌟";

/// Completion percentage, 0..=100, never decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Progress(u8);

/// Result of advancing progress by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub before: Progress,
    pub after: Progress,
    pub milestone: bool,
}

impl Progress {
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Advances by `PROGRESS_STEP`, clamped at `PROGRESS_CEILING`.
    ///
    /// The milestone check uses the value *before* the increment and literal
    /// equality; it relies on progress only ever moving in steps of
    /// `PROGRESS_STEP` from zero.
    pub fn advance(&mut self) -> ProgressStep {
        let before = *self;
        self.0 = self.0.saturating_add(PROGRESS_STEP).min(PROGRESS_CEILING);
        ProgressStep {
            before,
            after: *self,
            milestone: STAR_MILESTONES.contains(&before.0),
        }
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= PROGRESS_CEILING
    }
}

/// Reward star counter, never decreasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Stars(u32);

impl Stars {
    #[must_use]
    pub fn count(self) -> u32 {
        self.0
    }

    pub(crate) fn award(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_in_steps_and_clamps() {
        let mut progress = Progress::default();
        for expected in [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 100, 100] {
            progress.advance();
            assert_eq!(progress.value(), expected);
        }
        assert!(progress.is_complete());
    }

    #[test]
    fn milestone_uses_pre_increment_value() {
        let mut progress = Progress::default();
        let hits: Vec<u8> = (0..12)
            .map(|_| progress.advance())
            .filter(|step| step.milestone)
            .map(|step| step.before.value())
            .collect();
        assert_eq!(hits, vec![30, 60, 90]);
    }
}
