use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{models::broadcast::BroadcastMessage, services::api::ApiClient};

/// Used when a zero poll interval is passed in; the tokio timer rejects zero.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// What a single `refresh()` did to the cached broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache now holds the fetched message.
    Replaced,
    /// The service had no message; the cache is unchanged.
    NoMessage,
    /// Transport or parse failure; the cache is unchanged.
    Failed,
    /// The sync client was (de)activated while the request was in flight,
    /// so the result was dropped.
    Stale,
}

struct SyncState {
    /// Bumped on every activation and deactivation. A refresh only writes
    /// the cache if the epoch it started in is still current.
    epoch: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    api: ApiClient,
    poll_interval: Duration,
    state: Mutex<SyncState>,
    current: watch::Sender<Option<BroadcastMessage>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

/// Keeps a local copy of the current broadcast in step with the service by
/// polling it.
///
/// Cloning is cheap and every clone shares the same cache slot.
#[derive(Clone)]
pub struct BroadcastSync {
    inner: Arc<Inner>,
}

impl BroadcastSync {
    pub fn new(api: ApiClient, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            warn!("Zero broadcast poll interval, using {:?}", DEFAULT_POLL_INTERVAL);
            DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                api,
                poll_interval,
                state: Mutex::new(SyncState {
                    epoch: 0,
                    timer: None,
                }),
                current,
            }),
        }
    }

    /// Start polling: one refresh right away, then one per `poll_interval`.
    /// Calling it while already active does nothing.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn activate(&self) {
        let mut state = self.state();
        if state.timer.is_some() {
            debug!("Broadcast sync already active (epoch {})", state.epoch);
            return;
        }

        state.epoch += 1;
        let epoch = state.epoch;
        let period = self.inner.poll_interval;
        let weak = Arc::downgrade(&self.inner);
        state.timer = Some(tokio::spawn(poll_loop(weak, period)));

        info!("Broadcast sync activated (epoch {}, every {:?})", epoch, period);
    }

    /// Stop polling. Requests already in flight are left to finish, but
    /// their results are discarded.
    pub fn deactivate(&self) {
        let mut state = self.state();
        let Some(timer) = state.timer.take() else {
            return;
        };
        timer.abort();
        state.epoch += 1;
        info!("Broadcast sync deactivated (epoch {})", state.epoch);
    }

    pub fn is_active(&self) -> bool {
        self.state().timer.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.state().epoch
    }

    /// Fetch the broadcast once and update the cache.
    ///
    /// Never fails: a missing message or a failed request leaves the cached
    /// value as it was. A present message always replaces the cache, even
    /// when it is identical to what is already there.
    pub async fn refresh(&self) -> RefreshOutcome {
        let started_in = self.epoch();
        let fetched = self.inner.api.fetch_broadcast().await;

        let state = self.state();
        if state.epoch != started_in {
            debug!(
                "Dropping broadcast response from epoch {} (now {})",
                started_in, state.epoch
            );
            return RefreshOutcome::Stale;
        }

        // Last response to arrive wins; there is no ordering by createdAt.
        match fetched {
            Ok(Some(message)) if !message.message.trim().is_empty() => {
                debug!("Broadcast {} received", message.id);
                self.inner.current.send_replace(Some(message));
                RefreshOutcome::Replaced
            }
            Ok(_) => RefreshOutcome::NoMessage,
            Err(e) => {
                warn!("Broadcast fetch failed: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// The cached broadcast, if one has ever been fetched.
    pub fn current(&self) -> Option<BroadcastMessage> {
        self.inner.current.borrow().clone()
    }

    /// Watch the cache. Every replacement notifies, identical or not.
    pub fn subscribe(&self) -> watch::Receiver<Option<BroadcastMessage>> {
        self.inner.current.subscribe()
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Timer task. Each tick spawns its own refresh so a slow response never
/// delays the next poll. Holds only a weak handle so dropping every
/// `BroadcastSync` ends the loop.
async fn poll_loop(weak: Weak<Inner>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(inner) = weak.upgrade() else {
            break;
        };
        let sync = BroadcastSync { inner };
        tokio::spawn(async move {
            sync.refresh().await;
        });
    }
}
