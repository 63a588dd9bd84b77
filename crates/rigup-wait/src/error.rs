use std::time::Duration;

use thiserror::Error;

/// Terminal outcomes of a wait that did not reach readiness.
///
/// Fetch failures are surfaced immediately rather than retried here:
/// repeated transport errors usually mean a systemic outage, not a
/// resource that is merely "not ready yet". Retry policy, if any,
/// belongs to the fetch capability itself.
#[derive(Debug, Error)]
pub enum WaitError<E> {
    #[error("timed out after {elapsed:?} waiting for resource to become ready")]
    Timeout { elapsed: Duration },

    #[error("resource vanished from the status listing")]
    Vanished,

    #[error("status fetch failed: {0}")]
    Fetch(#[source] E),
}
