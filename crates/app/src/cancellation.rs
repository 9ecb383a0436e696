//! Operation cancellation and deadlines.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use thiserror::Error;

/// Why an operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CancellationCause {
    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation handle carried by every storage operation.
///
/// Clones share the cancelled flag, so cancelling any clone cancels them all.
/// The deadline is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A handle with no deadline that is only stopped by [`Cancellation::cancel`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A handle that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Check whether the operation may proceed.
    ///
    /// # Errors
    ///
    /// Returns the cause when the handle was cancelled or its deadline passed.
    /// An explicit cancel takes precedence over an expired deadline.
    pub fn check(&self) -> Result<(), CancellationCause> {
        if self.is_cancelled() {
            return Err(CancellationCause::Cancelled);
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(CancellationCause::DeadlineExceeded)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_handle_allows_progress() {
        assert_eq!(Cancellation::new().check(), Ok(()));
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let cancellation = Cancellation::new();
        let clone = cancellation.clone();

        clone.cancel();

        assert!(cancellation.is_cancelled(), "clone should cancel the original");
        assert_eq!(cancellation.check(), Err(CancellationCause::Cancelled));
    }

    #[test]
    fn elapsed_deadline_reports_deadline_exceeded() {
        let cancellation = Cancellation::with_deadline(Instant::now());

        assert_eq!(
            cancellation.check(),
            Err(CancellationCause::DeadlineExceeded)
        );
    }

    #[test]
    fn future_deadline_allows_progress() {
        let cancellation = Cancellation::with_timeout(Duration::from_secs(3600));

        assert_eq!(cancellation.check(), Ok(()));
        assert!(cancellation.deadline().is_some(), "deadline should be set");
    }

    #[test]
    fn cancel_takes_precedence_over_deadline() {
        let cancellation = Cancellation::with_deadline(Instant::now());

        cancellation.cancel();

        assert_eq!(cancellation.check(), Err(CancellationCause::Cancelled));
    }
}
