//! Feedback State
//!
//! A boolean flag that switches itself off after a fixed duration, for
//! transient "copied" / "saved" indicators.
//!
//! ```rust,no_run
//! use picko::ui::FeedbackState;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let copied = FeedbackState::new(Duration::from_millis(2000));
//! copied.trigger();
//! assert!(copied.is_active());
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default time a feedback flag stays on
pub const DEFAULT_FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Default)]
struct Inner {
    active: bool,
    /// Bumped on every trigger/reset so a stale timer never clears a newer one
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Self-resetting flag. Must be triggered from within a tokio runtime.
#[derive(Debug)]
pub struct FeedbackState {
    duration: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl Default for FeedbackState {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DURATION)
    }
}

impl FeedbackState {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    /// Turn the flag on and restart the reset timer
    pub fn trigger(&self) {
        let mut inner = self.lock();
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }

        inner.active = true;
        inner.generation += 1;
        let generation = inner.generation;

        let shared = Arc::clone(&self.inner);
        let duration = self.duration;
        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if inner.generation == generation {
                inner.active = false;
                inner.pending = None;
            }
        }));
    }

    /// Turn the flag off now and cancel any pending reset
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }
        inner.generation += 1;
        inner.active = false;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for FeedbackState {
    fn drop(&mut self) {
        if let Some(pending) = self.lock().pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_sets_active_immediately() {
        let state = FeedbackState::new(ms(2000));
        assert!(!state.is_active());

        state.trigger();
        assert!(state.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_resets_after_duration() {
        let state = FeedbackState::new(ms(2000));
        state.trigger();

        sleep(ms(1999)).await;
        assert!(state.is_active());

        sleep(ms(2)).await;
        assert!(!state.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_trigger_restarts_timer() {
        let state = FeedbackState::new(ms(2000));
        state.trigger();

        sleep(ms(1500)).await;
        state.trigger();

        // 2500ms after the first trigger, 1000ms after the second
        sleep(ms(1000)).await;
        assert!(state.is_active());

        // 1999ms after the second trigger
        sleep(ms(999)).await;
        assert!(state.is_active());

        sleep(ms(2)).await;
        assert!(!state.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_timer() {
        let state = FeedbackState::new(ms(2000));
        state.trigger();
        state.reset();
        assert!(!state.is_active());

        sleep(ms(500)).await;
        state.trigger();

        // The cancelled timer would have fired here
        sleep(ms(1600)).await;
        assert!(state.is_active());

        sleep(ms(500)).await;
        assert!(!state.is_active());
    }

    #[test]
    fn test_default_duration() {
        assert_eq!(FeedbackState::default().duration(), ms(2000));
    }
}
