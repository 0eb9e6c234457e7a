use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("scroll delay must be between 1 and 2000 ms")]
    InvalidScrollDelay,

    #[error("fade window must be between 1 and 10000 ms")]
    InvalidFadeWindow,

    #[error("message lifetime must be between 1 and 60000 ms")]
    InvalidMessageTtl,

    #[error("scroll threshold must be a finite, non-negative pixel count")]
    InvalidScrollThreshold,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Timing and scroll tuning for a lesson session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonSettings {
    scroll_delay: Duration,
    fade_window: Duration,
    message_ttl: Duration,
    scroll_threshold: f64,
}

impl LessonSettings {
    /// Default tuning:
    /// - 100 ms before scrolling to a new block (lets it mount)
    /// - 1 s visibility transition after a continuation
    /// - 3 s toast lifetime
    /// - 10 px upward scroll before earlier blocks come back
    #[must_use]
    pub fn standard() -> Self {
        Self {
            scroll_delay: Duration::from_millis(100),
            fade_window: Duration::from_millis(1000),
            message_ttl: Duration::from_millis(3000),
            scroll_threshold: 10.0,
        }
    }

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a duration is out of range or the threshold
    /// is negative or not finite.
    pub fn new(
        scroll_delay: Duration,
        fade_window: Duration,
        message_ttl: Duration,
        scroll_threshold: f64,
    ) -> Result<Self, SettingsError> {
        if !(1..=2_000).contains(&scroll_delay.as_millis()) {
            return Err(SettingsError::InvalidScrollDelay);
        }
        if !(1..=10_000).contains(&fade_window.as_millis()) {
            return Err(SettingsError::InvalidFadeWindow);
        }
        if !(1..=60_000).contains(&message_ttl.as_millis()) {
            return Err(SettingsError::InvalidMessageTtl);
        }
        if !scroll_threshold.is_finite() || scroll_threshold < 0.0 {
            return Err(SettingsError::InvalidScrollThreshold);
        }
        Ok(Self {
            scroll_delay,
            fade_window,
            message_ttl,
            scroll_threshold,
        })
    }

    #[must_use]
    pub fn scroll_delay(&self) -> Duration {
        self.scroll_delay
    }

    #[must_use]
    pub fn fade_window(&self) -> Duration {
        self.fade_window
    }

    #[must_use]
    pub fn message_ttl(&self) -> Duration {
        self.message_ttl
    }

    #[must_use]
    pub fn scroll_threshold(&self) -> f64 {
        self.scroll_threshold
    }

    /// Returns a copy with a different fade window.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidFadeWindow` when out of range.
    pub fn with_fade_window(self, fade_window: Duration) -> Result<Self, SettingsError> {
        Self::new(
            self.scroll_delay,
            fade_window,
            self.message_ttl,
            self.scroll_threshold,
        )
    }

    /// Returns a copy with a different scroll threshold.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidScrollThreshold` when invalid.
    pub fn with_scroll_threshold(self, scroll_threshold: f64) -> Result<Self, SettingsError> {
        Self::new(
            self.scroll_delay,
            self.fade_window,
            self.message_ttl,
            scroll_threshold,
        )
    }
}

impl Default for LessonSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_settings_are_valid() {
        let s = LessonSettings::standard();
        let rebuilt = LessonSettings::new(
            s.scroll_delay(),
            s.fade_window(),
            s.message_ttl(),
            s.scroll_threshold(),
        )
        .unwrap();
        assert_eq!(rebuilt, s);
    }

    #[test]
    fn rejects_zero_durations() {
        let s = LessonSettings::standard();
        assert_eq!(
            LessonSettings::new(Duration::ZERO, s.fade_window(), s.message_ttl(), 1.0),
            Err(SettingsError::InvalidScrollDelay)
        );
        assert_eq!(
            s.with_fade_window(Duration::ZERO),
            Err(SettingsError::InvalidFadeWindow)
        );
    }

    #[test]
    fn rejects_bad_threshold() {
        let s = LessonSettings::standard();
        assert_eq!(
            s.with_scroll_threshold(-1.0),
            Err(SettingsError::InvalidScrollThreshold)
        );
        assert_eq!(
            s.with_scroll_threshold(f64::NAN),
            Err(SettingsError::InvalidScrollThreshold)
        );
        assert!(s.with_scroll_threshold(0.0).is_ok());
    }
}
