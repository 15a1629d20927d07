use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::api::Remote;
use crate::controller::Controller;
use crate::error::CarThingError;

/// Default delay between two poll ticks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
/// Longest accepted delay between two poll ticks
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Result of a single poll tick
#[derive(Debug)]
pub enum TickOutcome {
    /// Remote state was read and committed
    Updated,
    /// Nothing is playing; the previous state was kept
    Skipped,
    /// Tick was aborted; the previous state was kept
    Failed(CarThingError),
}

impl TickOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TickOutcome::Failed(_))
    }
}

/// Recurring poll schedule driven by the host loop.
///
/// The poller owns no thread. The host asks how long it may sleep, then calls
/// `run_due` with the current instant. Once the token is cancelled no further
/// tick runs, and a tick never runs concurrently with a button handler
/// because both happen on the host's thread. The next tick is due one
/// interval after the previous one finished.
pub struct Poller {
    interval: Duration,
    next_due: Instant,
    token: CancellationToken,
}

impl Poller {
    /// The first tick is due immediately. `interval` is capped at `MAX_INTERVAL`.
    pub fn new(interval: Duration, token: CancellationToken, now: Instant) -> Self {
        Self {
            interval: interval.min(MAX_INTERVAL),
            next_due: now,
            token,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.is_cancelled() && now >= self.next_due
    }

    /// Time the host may block before the next tick; `None` once cancelled
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        if self.is_cancelled() {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    /// Run one tick if it is due and schedule the next one.
    ///
    /// Errors never stop the schedule; they are logged and reported back.
    pub fn run_due<R: Remote>(&mut self, controller: &mut Controller<R>, now: Instant) -> Option<TickOutcome> {
        if !self.is_due(now) {
            return None;
        }

        let started = Instant::now();
        let outcome = match controller.poll() {
            Ok(()) => TickOutcome::Updated,
            Err(e) if e.is_benign() => {
                log::debug!("Poll skipped: {}", e);
                TickOutcome::Skipped
            }
            Err(e) => {
                log::warn!("Poll failed: {}", e);
                TickOutcome::Failed(e)
            }
        };

        // Measured on the real clock, applied on the caller's timeline
        let finished = now.checked_add(started.elapsed()).unwrap_or(now);
        self.next_due = finished.checked_add(self.interval).unwrap_or(finished);
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{MockRemote, MockRemoteBuilder, SnapshotBuilder};
    use crate::artwork::ArtworkStore;
    use std::thread;
    use tempfile::TempDir;

    /// Upper bound for how long a mocked tick takes on the real clock
    const TICK_SLACK: Duration = Duration::from_millis(100);

    fn create_controller(remote: MockRemote) -> (Controller<MockRemote>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let artwork = ArtworkStore::new(dir.path().join("album_art.jpg"));
        (Controller::new(remote, artwork), dir)
    }

    #[test]
    fn test_first_tick_is_due_immediately() {
        let now = Instant::now();
        let poller = Poller::new(DEFAULT_INTERVAL, CancellationToken::new(), now);

        assert!(poller.is_due(now));
        assert_eq!(poller.time_until_due(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_next_tick_scheduled_after_interval() {
        let remote = MockRemoteBuilder::new()
            .playback(SnapshotBuilder::new().without_art().build())
            .build();
        let (mut controller, _dir) = create_controller(remote);
        let start = Instant::now();
        let mut poller = Poller::new(Duration::from_millis(1000), CancellationToken::new(), start);

        assert!(matches!(poller.run_due(&mut controller, start), Some(TickOutcome::Updated)));

        let early = start + Duration::from_millis(999);
        assert!(poller.run_due(&mut controller, early).is_none());
        let remaining = poller.time_until_due(early).unwrap();
        assert!(remaining >= Duration::from_millis(1));
        assert!(remaining <= Duration::from_millis(1) + TICK_SLACK);

        let due = start + Duration::from_millis(1000) + TICK_SLACK;
        assert!(poller.run_due(&mut controller, due).is_some());
    }

    #[test]
    fn test_slow_tick_delays_next_one() {
        let mut remote = MockRemote::new();
        remote.expect_current_playback().times(1).returning(|| {
            thread::sleep(Duration::from_millis(300));
            Ok(None)
        });
        let (mut controller, _dir) = create_controller(remote);
        let start = Instant::now();
        let mut poller = Poller::new(Duration::from_millis(200), CancellationToken::new(), start);

        assert!(poller.run_due(&mut controller, start).is_some());

        let remaining = poller.time_until_due(Instant::now()).unwrap();
        assert!(remaining >= Duration::from_millis(150), "next tick due in {:?}", remaining);
        assert!(!poller.is_due(start + Duration::from_millis(450)));
    }

    #[test]
    fn test_interval_is_capped() {
        let remote = MockRemoteBuilder::new().no_session().build();
        let (mut controller, _dir) = create_controller(remote);
        let now = Instant::now();
        let mut poller = Poller::new(Duration::MAX, CancellationToken::new(), now);

        assert_eq!(poller.interval(), MAX_INTERVAL);
        assert!(poller.run_due(&mut controller, now).is_some());
        assert!(poller.time_until_due(now).unwrap() >= MAX_INTERVAL);
    }

    #[test]
    fn test_no_session_is_skipped() {
        let remote = MockRemoteBuilder::new().no_session().build();
        let (mut controller, _dir) = create_controller(remote);
        let now = Instant::now();
        let mut poller = Poller::new(DEFAULT_INTERVAL, CancellationToken::new(), now);

        let outcome = poller.run_due(&mut controller, now);

        assert!(matches!(outcome, Some(TickOutcome::Skipped)));
    }

    #[test]
    fn test_failure_keeps_schedule() {
        let mut remote = MockRemote::new();
        remote.expect_current_playback().times(2).returning(|| {
            Err(CarThingError::RemoteCallFailed {
                status: 500,
                message: "Server error".to_string(),
            })
        });
        let (mut controller, _dir) = create_controller(remote);
        let start = Instant::now();
        let mut poller = Poller::new(DEFAULT_INTERVAL, CancellationToken::new(), start);

        let first = poller.run_due(&mut controller, start).unwrap();
        assert!(first.is_failure());

        let second = poller.run_due(&mut controller, start + DEFAULT_INTERVAL + TICK_SLACK).unwrap();
        assert!(second.is_failure());
    }

    #[test]
    fn test_cancelled_poller_never_ticks() {
        let mut remote = MockRemote::new();
        remote.expect_current_playback().times(0);
        let (mut controller, _dir) = create_controller(remote);
        let token = CancellationToken::new();
        let now = Instant::now();
        let mut poller = Poller::new(DEFAULT_INTERVAL, token.clone(), now);

        token.cancel();

        assert!(poller.is_cancelled());
        assert!(!poller.is_due(now));
        assert_eq!(poller.time_until_due(now), None);
        assert!(poller.run_due(&mut controller, now + Duration::from_secs(10)).is_none());
    }
}
