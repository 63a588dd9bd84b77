use std::fmt;

use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::WaitError;
use crate::options::{AbsencePolicy, WaitOptions};
use crate::source::{StatusSource, Tracked};

/// Poll `source` until the snapshot for `handle` satisfies `predicate`.
///
/// Each iteration fetches a fresh listing and searches it for the
/// tracked handle. A missing handle is transient by default (see
/// [`AbsencePolicy`]); a present-but-not-ready snapshot suspends the
/// task for `options.poll_interval` and retries. The first satisfying
/// snapshot is returned as-is, and the handle is never polled again.
///
/// With a configured timeout the wait ends in [`WaitError::Timeout`]
/// no earlier than the deadline and no later than one poll interval
/// past it. A predicate satisfied by the very first fetch returns
/// without sleeping at all.
pub async fn wait_until_ready<S, P>(
    source: &S,
    handle: &<S::Status as Tracked>::Handle,
    predicate: P,
    options: &WaitOptions,
) -> Result<S::Status, WaitError<S::Error>>
where
    S: StatusSource,
    S::Status: Tracked + fmt::Debug,
    P: Fn(&S::Status) -> bool,
{
    let started = Instant::now();
    let mut seen = false;

    loop {
        let listing = source.fetch().await.map_err(WaitError::Fetch)?;

        match listing.into_iter().find(|s| s.handle() == *handle) {
            Some(snapshot) => {
                if predicate(&snapshot) {
                    return Ok(snapshot);
                }
                seen = true;
                debug!(?snapshot, "resource not ready yet");
            }
            None if seen && options.absence == AbsencePolicy::Fail => {
                return Err(WaitError::Vanished);
            }
            None => {
                debug!("resource not listed yet");
            }
        }

        let elapsed = started.elapsed();
        if let Some(timeout) = options.timeout
            && elapsed >= timeout
        {
            return Err(WaitError::Timeout { elapsed });
        }
        sleep(options.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use thiserror::Error;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeStatus {
        id: u64,
        state: &'static str,
    }

    impl Tracked for FakeStatus {
        type Handle = u64;

        fn handle(&self) -> u64 {
            self.id
        }
    }

    #[derive(Debug, Error)]
    #[error("listing endpoint unreachable")]
    struct FakeFetchError;

    /// Replays a scripted sequence of listings; an exhausted script
    /// keeps returning empty listings.
    struct Scripted {
        batches: Mutex<VecDeque<Result<Vec<FakeStatus>, FakeFetchError>>>,
        fetches: AtomicUsize,
    }

    impl Scripted {
        fn new(batches: Vec<Result<Vec<FakeStatus>, FakeFetchError>>) -> Self {
            Self {
                batches: Mutex::new(batches.into()),
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusSource for Scripted {
        type Status = FakeStatus;
        type Error = FakeFetchError;

        async fn fetch(&self) -> Result<Vec<FakeStatus>, FakeFetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let next = self.batches.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn pending(id: u64) -> FakeStatus {
        FakeStatus { id, state: "pending" }
    }

    fn running(id: u64) -> FakeStatus {
        FakeStatus { id, state: "running" }
    }

    fn is_running(s: &FakeStatus) -> bool {
        s.state == "running"
    }

    fn no_sleep() -> WaitOptions {
        WaitOptions::new().with_poll_interval(Duration::ZERO)
    }

    #[tokio::test]
    async fn returns_first_ready_snapshot_after_exactly_three_fetches() {
        let source = Scripted::new(vec![
            Ok(vec![pending(42)]),
            Ok(vec![pending(42)]),
            Ok(vec![running(42)]),
        ]);

        let snapshot = wait_until_ready(&source, &42, is_running, &no_sleep())
            .await
            .unwrap();

        assert_eq!(snapshot, running(42));
        assert_eq!(source.fetches(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_on_first_fetch_returns_without_sleeping() {
        let source = Scripted::new(vec![Ok(vec![running(1)])]);
        let options = WaitOptions::new().with_poll_interval(Duration::from_secs(3));

        let before = Instant::now();
        let snapshot = wait_until_ready(&source, &1, is_running, &options)
            .await
            .unwrap();

        assert_eq!(snapshot, running(1));
        assert_eq!(source.fetches(), 1);
        // Virtual time only advances across sleeps, so none happened.
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn never_listed_handle_times_out_after_one_poll_interval() {
        let source = Scripted::new(Vec::new());
        let options = WaitOptions::new()
            .with_poll_interval(Duration::from_secs(3))
            .with_timeout(Duration::from_secs(3));

        let err = wait_until_ready(&source, &7, is_running, &options)
            .await
            .unwrap_err();

        match err {
            WaitError::Timeout { elapsed } => assert_eq!(elapsed, Duration::from_secs(3)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_no_earlier_than_deadline_and_within_one_interval() {
        let source = Scripted::new(Vec::new());
        let options = WaitOptions::new()
            .with_poll_interval(Duration::from_secs(3))
            .with_timeout(Duration::from_secs(7));

        let before = Instant::now();
        let err = wait_until_ready(&source, &7, is_running, &options)
            .await
            .unwrap_err();
        let elapsed = before.elapsed();

        assert!(matches!(err, WaitError::Timeout { .. }));
        assert!(elapsed >= Duration::from_secs(7), "fired early: {elapsed:?}");
        assert!(
            elapsed <= Duration::from_secs(10),
            "fired more than one interval past the deadline: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn fetch_error_propagates_without_further_fetches() {
        let source = Scripted::new(vec![Err(FakeFetchError), Ok(vec![running(5)])]);

        let err = wait_until_ready(&source, &5, is_running, &no_sleep())
            .await
            .unwrap_err();

        assert!(matches!(err, WaitError::Fetch(_)));
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn absence_before_first_sighting_is_transient() {
        let source = Scripted::new(vec![Ok(Vec::new()), Ok(vec![running(9)])]);

        let snapshot = wait_until_ready(&source, &9, is_running, &no_sleep())
            .await
            .unwrap();

        assert_eq!(snapshot, running(9));
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn vanished_handle_fails_under_fail_policy() {
        let source = Scripted::new(vec![Ok(vec![pending(3)]), Ok(Vec::new())]);
        let options = no_sleep().with_absence(AbsencePolicy::Fail);

        let err = wait_until_ready(&source, &3, is_running, &options)
            .await
            .unwrap_err();

        assert!(matches!(err, WaitError::Vanished));
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn vanished_handle_is_retried_under_default_policy() {
        let source = Scripted::new(vec![
            Ok(vec![pending(3)]),
            Ok(Vec::new()),
            Ok(vec![running(3)]),
        ]);

        let snapshot = wait_until_ready(&source, &3, is_running, &no_sleep())
            .await
            .unwrap();

        assert_eq!(snapshot, running(3));
        assert_eq!(source.fetches(), 3);
    }

    #[tokio::test]
    async fn other_handles_in_the_listing_are_ignored() {
        let source = Scripted::new(vec![
            Ok(vec![running(1), pending(2)]),
            Ok(vec![running(1), running(2)]),
        ]);

        let snapshot = wait_until_ready(&source, &2, is_running, &no_sleep())
            .await
            .unwrap();

        assert_eq!(snapshot, running(2));
        assert_eq!(source.fetches(), 2);
    }
}
