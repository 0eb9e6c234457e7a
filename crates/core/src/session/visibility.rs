use serde::Serialize;

/// Which blocks the presentation layer shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Every block is shown.
    #[default]
    AllVisible,
    /// A continuation is animating: only the newest block is shown and
    /// manual scroll input is ignored.
    Transitioning,
    /// Only the newest block is shown until the learner scrolls up.
    OnlyLatestVisible,
}

impl VisibilityState {
    #[must_use]
    pub fn shows_all(self) -> bool {
        matches!(self, VisibilityState::AllVisible)
    }

    #[must_use]
    pub fn is_auto_scrolling(self) -> bool {
        matches!(self, VisibilityState::Transitioning)
    }
}

/// Manual scroll position and the lowest point of the current upward run.
///
/// Slow scrolling arrives as many small offsets; measuring from the anchor
/// lets them add up toward the threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct ScrollTracker {
    last_offset: f64,
    anchor: f64,
}

impl ScrollTracker {
    /// Records `offset` and returns the upward travel since the view last
    /// moved down: zero while moving down, negative while moving up.
    pub(crate) fn record(&mut self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        if offset >= self.last_offset {
            self.anchor = offset;
        }
        self.last_offset = offset;
        offset - self.anchor
    }

    /// Starts a fresh run at the current position.
    pub(crate) fn settle(&mut self) {
        self.anchor = self.last_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_accumulates_upward_travel() {
        let mut tracker = ScrollTracker::default();
        assert_eq!(tracker.record(120.0), 0.0);
        assert_eq!(tracker.record(116.0), -4.0);
        assert_eq!(tracker.record(110.0), -10.0);
        assert_eq!(tracker.record(130.0), 0.0);
        assert_eq!(tracker.record(f64::NAN), 0.0);
    }

    #[test]
    fn settle_restarts_the_run() {
        let mut tracker = ScrollTracker::default();
        tracker.record(500.0);
        tracker.record(200.0);
        tracker.settle();
        assert_eq!(tracker.record(195.0), -5.0);
    }
}
