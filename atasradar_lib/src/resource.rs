//! Loading state shared by every view: `Idle → Loading → {Ready, Failed}`.
//!
//! A [`Resource`] holds the value a view displays. Loading replaces the value
//! only on success; a failed load keeps the previous (or default) value
//! visible and records the error. Every load leaves the `Loading` state when
//! it settles, whatever the outcome.

use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Why a load did not produce a value.
#[derive(Debug)]
pub enum LoadError<E> {
    Failed(E),
    /// The resource was torn down before the load settled.
    Cancelled,
}

impl<E: fmt::Display> fmt::Display for LoadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Failed(e) => write!(f, "{}", e),
            LoadError::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for LoadError<E> {}

/// A value loaded asynchronously, with its load state and last error.
pub struct Resource<T> {
    label: &'static str,
    value: T,
    state: LoadState,
    error: Option<String>,
    teardown: CancellationToken,
}

impl<T> Resource<T> {
    /// Creates an idle resource showing `initial` until the first success.
    pub fn new(label: &'static str, initial: T) -> Self {
        Self {
            label,
            value: initial,
            state: LoadState::Idle,
            error: None,
            teardown: CancellationToken::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Message of the most recent failure, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Token that fires when the resource is torn down. Hand it to work that
    /// should stop with the view, or cancel it from another task.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.teardown.is_cancelled()
    }

    /// Cancels in-flight work. Later loads settle as cancelled immediately.
    pub fn teardown(&self) {
        self.teardown.cancel();
    }

    /// Replaces the value without a fetch, e.g. to clear a stale result.
    pub fn reset(&mut self, value: T) {
        self.value = value;
        self.state = LoadState::Idle;
        self.error = None;
    }

    /// Runs `fetch` and stores its result.
    ///
    /// The fetch races the teardown token; on cancellation the future is
    /// dropped, which aborts any request it had in flight.
    pub async fn load<F, E>(&mut self, fetch: F) -> Result<&T, LoadError<E>>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let token = self.teardown.clone();
        let (outcome, previous) = {
            // Restores the previous state if this future is dropped mid-fetch.
            let guard = LoadingGuard::enter(&mut self.state);
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => None,
                result = fetch => Some(result),
            };
            (outcome, guard.previous)
        };

        match outcome {
            Some(Ok(value)) => {
                self.value = value;
                self.state = LoadState::Ready;
                self.error = None;
                Ok(&self.value)
            }
            Some(Err(e)) => {
                tracing::error!(view = self.label, "Failed to load: {}", e);
                self.state = LoadState::Failed;
                self.error = Some(e.to_string());
                Err(LoadError::Failed(e))
            }
            None => {
                tracing::debug!(view = self.label, "load dropped after teardown");
                self.state = previous;
                Err(LoadError::Cancelled)
            }
        }
    }
}

/// Holds a resource in `Loading` and puts back the state it replaced when
/// dropped.
struct LoadingGuard<'a> {
    state: &'a mut LoadState,
    previous: LoadState,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a mut LoadState) -> Self {
        let previous = match *state {
            LoadState::Loading => LoadState::Idle,
            other => other,
        };
        *state = LoadState::Loading;
        Self { state, previous }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.state = self.previous;
    }
}

impl<T> Drop for Resource<T> {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}

impl<T: fmt::Debug> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("state", &self.state)
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn success_stores_value() {
        let mut res = Resource::new("teste", 0);
        assert_eq!(res.state(), LoadState::Idle);

        let got = res.load(async { Ok::<_, String>(42) }).await.unwrap();
        assert_eq!(*got, 42);
        assert_eq!(res.state(), LoadState::Ready);
        assert!(!res.is_loading());
        assert_eq!(res.error(), None);
    }

    #[tokio::test]
    async fn failure_keeps_previous_value() {
        let mut res = Resource::new("teste", vec![1, 2]);
        res.load(async { Ok::<_, String>(vec![3]) }).await.unwrap();

        let err = res
            .load(async { Err::<Vec<i32>, _>("HTTP 500".to_string()) })
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Failed(ref m) if m == "HTTP 500"));
        assert_eq!(res.value(), &vec![3]);
        assert_eq!(res.state(), LoadState::Failed);
        assert!(!res.is_loading());
        assert_eq!(res.error(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn failure_before_any_success_keeps_default() {
        let mut res: Resource<Option<i64>> = Resource::new("teste", None);
        let _ = res.load(async { Err::<Option<i64>, _>("falhou") }).await;
        assert_eq!(res.value(), &None);
        assert_eq!(res.state(), LoadState::Failed);
    }

    #[tokio::test]
    async fn success_clears_previous_error() {
        let mut res = Resource::new("teste", 0);
        let _ = res.load(async { Err::<i32, _>("x") }).await;
        res.load(async { Ok::<_, &str>(1) }).await.unwrap();
        assert_eq!(res.error(), None);
        assert_eq!(res.state(), LoadState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_drops_in_flight_load() {
        let mut res = Resource::new("teste", 7);
        let token = res.cancellation_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            token.cancel();
        });

        let err = res
            .load(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, String>(8)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Cancelled));
        assert_eq!(*res.value(), 7);
        assert_eq!(res.state(), LoadState::Idle);
        assert!(res.is_torn_down());
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_load_clears_loading_flag() {
        let mut res = Resource::new("teste", 5);
        res.load(async { Ok::<_, String>(6) }).await.unwrap();

        let timed_out = tokio::time::timeout(
            Duration::from_secs(1),
            res.load(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, String>(7)
            }),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!res.is_loading());
        assert_eq!(res.state(), LoadState::Ready);
        assert_eq!(*res.value(), 6);

        res.load(async { Ok::<_, String>(8) }).await.unwrap();
        assert_eq!(*res.value(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_first_load_returns_to_idle() {
        let mut res: Resource<Option<i64>> = Resource::new("teste", None);
        let _ = tokio::time::timeout(
            Duration::from_millis(10),
            res.load(std::future::pending::<Result<Option<i64>, String>>()),
        )
        .await;
        assert_eq!(res.state(), LoadState::Idle);
    }

    #[tokio::test]
    async fn loads_after_teardown_are_cancelled() {
        let mut res = Resource::new("teste", 1);
        res.load(async { Ok::<_, String>(2) }).await.unwrap();
        res.teardown();
        let err = res.load(async { Ok::<_, String>(3) }).await.unwrap_err();
        assert!(matches!(err, LoadError::Cancelled));
        assert_eq!(*res.value(), 2);
        assert_eq!(res.state(), LoadState::Ready);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut res = Resource::new("teste", Some(1));
        res.reset(None);
        assert_eq!(res.value(), &None);
        assert_eq!(res.state(), LoadState::Idle);
    }
}
