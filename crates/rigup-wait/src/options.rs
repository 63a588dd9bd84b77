use std::time::Duration;

/// Interval between status polls unless overridden.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// What to do when the tracked handle is missing from a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsencePolicy {
    /// Treat absence as transient and keep polling. Freshly created
    /// resources are often not enumerable for the first few polls.
    #[default]
    Retry,
    /// Fail once a previously seen handle disappears from the listing,
    /// e.g. because the resource was deleted externally.
    Fail,
}

/// Polling behavior for [`wait_until_ready`](crate::wait_until_ready).
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Sleep between polls.
    pub poll_interval: Duration,
    /// Maximum wall-clock duration to keep polling. `None` polls until
    /// the predicate holds or the fetch capability fails.
    pub timeout: Option<Duration>,
    /// Policy for handles missing from the listing.
    pub absence: AbsencePolicy,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            absence: AbsencePolicy::Retry,
        }
    }
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_absence(mut self, absence: AbsencePolicy) -> Self {
        self.absence = absence;
        self
    }
}
