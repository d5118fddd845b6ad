use crate::common::{NavError, NavResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Shared flag an operator (or a UI thread) flips to stop navigation.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition no longer holds.
    Cleared,
    /// A stop was requested while waiting.
    Cancelled,
}

/// The one place navigation waits: re-check a condition at a fixed interval.
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    timeout: Option<Duration>,
    stop: StopHandle,
}

impl Poller {
    pub fn new(interval: Duration, timeout: Option<Duration>, stop: StopHandle) -> Self {
        Self {
            interval,
            timeout,
            stop,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `condition` until it turns false, a stop is requested, or the
    /// timeout (if any) runs out.
    pub async fn wait_while<F>(&self, what: &str, mut condition: F) -> NavResult<WaitOutcome>
    where
        F: FnMut() -> bool,
    {
        let started = Instant::now();
        let mut polls = 0u32;
        loop {
            if !condition() {
                if polls > 0 {
                    tracing::debug!("Waited {:?} for {}", started.elapsed(), what);
                }
                return Ok(WaitOutcome::Cleared);
            }
            if self.stop.is_stop_requested() {
                return Ok(WaitOutcome::Cancelled);
            }
            if let Some(limit) = self.timeout {
                let waited = started.elapsed();
                if waited >= limit {
                    return Err(NavError::WaitTimedOut {
                        condition: what.to_string(),
                        waited_ms: waited.as_millis() as u64,
                    });
                }
            }
            polls += 1;
            sleep(self.interval).await;
        }
    }

    pub async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            sleep(duration).await;
        }
    }
}
