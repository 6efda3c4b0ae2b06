//! Fetch orchestration for one dashboard view session.
//!
//! A [`ViewSession`] owns the only shared mutable state of a session: the
//! current [`FetchState`], published through a `tokio::sync::watch` channel so
//! observers always read whole snapshots. Every fetch is tagged with a
//! generation; a completion is applied only while its generation is still the
//! newest one issued, so a call started later always wins over an earlier one.

use std::future::Future;
use std::sync::Arc;

use brent_api::{Client, RangeQuery, Resource};
use tokio::sync::watch;

use crate::adapter;
use crate::config::{DashboardConfig, ReentryPolicy, RetryConfig};
use crate::error::{DashboardError, FetchFailure};
use crate::model::{DateRange, ViewModel};

/// Lifecycle of the session's single view slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<ViewModel>),
    Failed(FetchFailure),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn view(&self) -> Option<&Arc<ViewModel>> {
        match self {
            FetchState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// A published state together with the generation that produced it.
/// Generation 0 is the initial `Idle` state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub state: FetchState,
}

/// Orchestrates the four concurrent retrievals of a view and publishes the result.
pub struct ViewSession {
    client: Client,
    retry: RetryConfig,
    reentry: ReentryPolicy,
    state: watch::Sender<Snapshot>,
}

impl ViewSession {
    pub fn new(config: &DashboardConfig) -> Self {
        let client = Client::with_base_url(&config.base_url).with_timeout(config.timeout);
        Self {
            client,
            retry: config.retry,
            reentry: config.reentry,
            state: watch::Sender::new(Snapshot::default()),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().state.clone()
    }

    /// Receives every published snapshot from now on.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    /// Fetches prices, change point, events and stats for `range` concurrently.
    ///
    /// Succeeds only if all four retrievals succeed. The outcome is published
    /// as `Ready` or `Failed` unless a newer fetch started in the meantime, in
    /// which case it is discarded; the caller still receives it.
    ///
    /// Dropping the returned future before it completes publishes
    /// `Failed` with [`CANCELLED_REASON`] for its generation, so the session
    /// never stays `Loading` for a call nobody is waiting on.
    pub async fn fetch_view(&self, range: &DateRange) -> Result<Arc<ViewModel>, DashboardError> {
        let pending = PendingFetch::new(self, self.begin()?);
        let query = range.to_query();
        tracing::debug!(generation = pending.generation, ?range, "fetching view");

        let result = self.fetch_all(&query).await.map(Arc::new);

        let state = match &result {
            Ok(view) => FetchState::Ready(Arc::clone(view)),
            Err(e) => {
                tracing::error!(generation = pending.generation, "fetch failed: {}", e);
                FetchState::Failed(FetchFailure::from(e))
            }
        };
        pending.finish(state);
        result
    }

    /// Issues the next generation and publishes `Loading`, or refuses under
    /// [`ReentryPolicy::Reject`] while a fetch is in flight.
    fn begin(&self) -> Result<u64, DashboardError> {
        let reentry = self.reentry;
        let mut issued = None;
        self.state.send_if_modified(|snapshot| {
            if reentry == ReentryPolicy::Reject && snapshot.state.is_loading() {
                return false;
            }
            let generation = snapshot.generation + 1;
            *snapshot = Snapshot {
                generation,
                state: FetchState::Loading,
            };
            issued = Some(generation);
            true
        });
        issued.ok_or_else(|| {
            tracing::warn!("fetch rejected: a request is already loading");
            DashboardError::Busy
        })
    }

    /// Applies `state` if `generation` is still the newest one issued.
    fn publish(&self, generation: u64, state: FetchState) -> bool {
        self.state.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                tracing::debug!(
                    generation,
                    current = snapshot.generation,
                    "discarding stale fetch result"
                );
                return false;
            }
            *snapshot = Snapshot { generation, state };
            true
        })
    }

    async fn fetch_all(&self, query: &RangeQuery) -> Result<ViewModel, DashboardError> {
        let (prices, change_point, events, stats) = tokio::try_join!(
            self.with_retry(Resource::Prices, || self.client.get_prices(query)),
            self.with_retry(Resource::ChangePoint, || self.client.get_change_point(query)),
            self.with_retry(Resource::Events, || self.client.get_events(query)),
            self.with_retry(Resource::Stats, || self.client.get_stats(query)),
        )?;
        adapter::view_model(prices, change_point, events, stats)
    }

    async fn with_retry<T, F, Fut>(&self, resource: Resource, mut f: F) -> Result<T, DashboardError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, brent_api::Error>>,
    {
        let mut attempt = 0usize;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err.into());
                    }
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s",
                        resource,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Reason published when a fetch is dropped before it completes.
pub const CANCELLED_REASON: &str = "Request was cancelled";

/// A generation that has published `Loading` and still owes a final state.
struct PendingFetch<'a> {
    session: &'a ViewSession,
    generation: u64,
    finished: bool,
}

impl<'a> PendingFetch<'a> {
    fn new(session: &'a ViewSession, generation: u64) -> Self {
        Self {
            session,
            generation,
            finished: false,
        }
    }

    fn finish(mut self, state: FetchState) {
        self.finished = true;
        self.session.publish(self.generation, state);
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::debug!(generation = self.generation, "fetch dropped before completion");
        self.session.publish(
            self.generation,
            FetchState::Failed(FetchFailure {
                reason: CANCELLED_REASON.to_string(),
            }),
        );
    }
}

fn is_retryable(err: &brent_api::Error) -> bool {
    match err {
        brent_api::Error::RequestFailed { .. } => true,
        brent_api::Error::HttpStatus { status, .. } => *status == 429 || *status >= 500,
        brent_api::Error::Parse { .. } => false,
    }
}
