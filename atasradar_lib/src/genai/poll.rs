//! Fixed-interval polling of long-running operations, with a deadline and
//! cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use super::error::GenAiError;

/// How often to check an operation and how long to keep trying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait before each status check, including the first.
    pub interval: Duration,
    /// Give up once this much time has passed. `None` waits forever.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_wait: Some(Duration::from_secs(600)),
        }
    }
}

/// Calls `check` every `policy.interval` until it yields `Some`.
///
/// A job that reports "not done" N times and then "done" costs exactly N+1
/// checks. Errors from `check` end the wait immediately.
pub async fn poll_until<T, F, Fut>(
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut check: F,
) -> Result<T, GenAiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, GenAiError>>,
{
    let started = Instant::now();
    let mut attempts: u32 = 0;
    loop {
        if let Some(max_wait) = policy.max_wait {
            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                tracing::warn!(attempts, "giving up on operation after {:?}", elapsed);
                return Err(GenAiError::PollTimedOut { attempts, elapsed });
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GenAiError::Cancelled),
            _ = sleep(policy.interval) => {}
        }

        attempts += 1;
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GenAiError::Cancelled),
            outcome = check() => outcome?,
        };
        match outcome {
            Some(done) => return Ok(done),
            None => tracing::debug!(attempts, "operation still running"),
        }
    }
}
