//! Stale-while-revalidate access to the transaction list.
//!
//! Every fetch module in the app follows the same read pattern: a live
//! cache entry is served immediately while a detached background
//! refetch repopulates the cache and the view state; a cache miss
//! fetches synchronously. Mutations never read the cache; they
//! invalidate and force a fresh fetch.
//!
//! Background refetches are epoch-guarded: an invalidation bumps the
//! epoch, and a refetch that began under an older epoch discards its
//! result instead of installing stale data over a mutation. Among
//! refetches of the same epoch, the last one to complete wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use super::compose::compose_views;
use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::TransactionView;
use crate::cache::TtlCache;

/// Cache key for the composed transaction list.
pub const TRANSACTIONS_CACHE_KEY: &str = "finance:transactions";

/// Every financial cache key lives under this prefix.
static FINANCE_KEYS: Lazy<Regex> =
    Lazy::new(|| Regex::new("^finance:").expect("static pattern is valid"));

/// Observer for background refresh outcomes.
///
/// Background failures never surface to the caller that triggered the
/// fast path; they are reported here (and traced) so tests and
/// monitoring can see them.
pub trait RefreshObserver: Send + Sync {
    /// A background refetch completed and installed its result.
    fn refresh_succeeded(&self) {}
    /// A background refetch failed; the cached data stays in place.
    fn refresh_failed(&self, error: &LedgerError) {
        let _ = error;
    }
    /// A background refetch completed under a superseded epoch and was
    /// discarded.
    fn refresh_discarded(&self) {}
}

/// Default observer: logs through `tracing` and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RefreshObserver for TracingObserver {
    fn refresh_failed(&self, error: &LedgerError) {
        tracing::warn!(%error, "background transaction refresh failed");
    }

    fn refresh_discarded(&self) {
        tracing::debug!("discarded background refresh from a superseded epoch");
    }
}

/// Point-in-time view of the feed for UI collaborators.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// The current denormalized transaction list.
    pub transactions: Vec<TransactionView>,
    /// Whether a synchronous fetch is in flight.
    pub loading: bool,
    /// The last read failure, if the data shown may be stale because
    /// of it. Prior data stays visible either way.
    pub error: Option<LedgerError>,
}

#[derive(Default)]
struct FeedState {
    transactions: Vec<TransactionView>,
    loading: bool,
    error: Option<LedgerError>,
}

impl FeedState {
    fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            transactions: self.transactions.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// Cached, stale-while-revalidate accessor for the transaction list.
///
/// Owns its view state; the cache instance is injected so call sites
/// (and tests) control its lifecycle explicitly.
pub struct TransactionFeed<S: LedgerStore> {
    store: Arc<S>,
    cache: Arc<TtlCache<Vec<TransactionView>>>,
    ttl: Duration,
    state: Arc<Mutex<FeedState>>,
    epoch: Arc<AtomicU64>,
    observer: Arc<dyn RefreshObserver>,
    background: Mutex<Option<JoinHandle<()>>>,
}

impl<S: LedgerStore> TransactionFeed<S> {
    /// Creates a feed over the given store and cache.
    ///
    /// `ttl` is the financial-data TTL, shorter than the app default.
    #[must_use]
    pub fn new(store: Arc<S>, cache: Arc<TtlCache<Vec<TransactionView>>>, ttl: Duration) -> Self {
        Self::with_observer(store, cache, ttl, Arc::new(TracingObserver))
    }

    /// Creates a feed with an injected refresh observer.
    #[must_use]
    pub fn with_observer(
        store: Arc<S>,
        cache: Arc<TtlCache<Vec<TransactionView>>>,
        ttl: Duration,
        observer: Arc<dyn RefreshObserver>,
    ) -> Self {
        Self {
            store,
            cache,
            ttl,
            state: Arc::new(Mutex::new(FeedState::default())),
            epoch: Arc::new(AtomicU64::new(0)),
            observer,
            background: Mutex::new(None),
        }
    }

    /// Returns the current snapshot without touching the store.
    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.lock().expect("feed state poisoned").snapshot()
    }

    /// Reads the transaction list, stale-while-revalidate.
    ///
    /// A live cache entry is returned immediately and a detached
    /// background refetch is scheduled; its failure never reaches this
    /// caller. On a cache miss the fetch is synchronous and a failure
    /// lands in the snapshot's `error` while prior data stays visible.
    pub async fn refresh(&self) -> FeedSnapshot {
        if let Some(cached) = self.cache.get(TRANSACTIONS_CACHE_KEY) {
            {
                let mut state = self.state.lock().expect("feed state poisoned");
                state.transactions = cached;
                state.loading = false;
                state.error = None;
            }
            self.spawn_revalidate();
            return self.snapshot();
        }

        self.state.lock().expect("feed state poisoned").loading = true;
        match fetch_views(self.store.as_ref()).await {
            Ok(views) => self.install(views),
            Err(error) => {
                tracing::warn!(%error, "transaction fetch failed");
                let mut state = self.state.lock().expect("feed state poisoned");
                state.loading = false;
                state.error = Some(error);
            }
        }
        self.snapshot()
    }

    /// Fetches fresh data, bypassing the cache entirely.
    ///
    /// Used after every successful mutation so denormalized fields are
    /// always store-derived truth rather than a local patch.
    pub async fn force_refresh(&self) -> Result<Vec<TransactionView>, LedgerError> {
        self.state.lock().expect("feed state poisoned").loading = true;
        match fetch_views(self.store.as_ref()).await {
            Ok(views) => {
                self.install(views.clone());
                Ok(views)
            }
            Err(error) => {
                tracing::warn!(%error, "forced transaction refresh failed");
                let mut state = self.state.lock().expect("feed state poisoned");
                state.loading = false;
                state.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Drops the cached transaction list and supersedes any in-flight
    /// background refetch.
    pub fn invalidate(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.cache.clear_pattern(&FINANCE_KEYS);
    }

    /// Sign-out hygiene: clears the cache and view state entirely and
    /// aborts any background refetch.
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.abort_background();
        self.cache.clear();
        let mut state = self.state.lock().expect("feed state poisoned");
        *state = FeedState::default();
    }

    /// Aborts the most recent background refetch, if still running.
    pub fn abort_background(&self) {
        if let Some(handle) = self
            .background
            .lock()
            .expect("background handle poisoned")
            .take()
        {
            handle.abort();
        }
    }

    /// Waits for the most recent background refetch to settle.
    ///
    /// Test hook; production callers never await background work.
    pub async fn join_background(&self) {
        let handle = self
            .background
            .lock()
            .expect("background handle poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    fn install(&self, views: Vec<TransactionView>) {
        self.cache
            .insert_with_ttl(TRANSACTIONS_CACHE_KEY, views.clone(), self.ttl);
        let mut state = self.state.lock().expect("feed state poisoned");
        state.transactions = views;
        state.loading = false;
        state.error = None;
    }

    fn spawn_revalidate(&self) {
        let store = Arc::clone(&self.store);
        let cache = Arc::clone(&self.cache);
        let state = Arc::clone(&self.state);
        let epoch = Arc::clone(&self.epoch);
        let observer = Arc::clone(&self.observer);
        let ttl = self.ttl;
        let started_epoch = epoch.load(Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            match fetch_views(store.as_ref()).await {
                Ok(views) => {
                    // A mutation may have invalidated while we were in
                    // flight; its forced refetch owns the truth then.
                    if epoch.load(Ordering::SeqCst) == started_epoch {
                        cache.insert_with_ttl(TRANSACTIONS_CACHE_KEY, views.clone(), ttl);
                        let mut state = state.lock().expect("feed state poisoned");
                        state.transactions = views;
                        state.error = None;
                        drop(state);
                        observer.refresh_succeeded();
                    } else {
                        observer.refresh_discarded();
                    }
                }
                Err(error) => observer.refresh_failed(&error),
            }
        });

        let mut slot = self.background.lock().expect("background handle poisoned");
        *slot = Some(handle);
    }
}

/// Fetches all normalized rows and composes the denormalized list.
async fn fetch_views<S: LedgerStore>(store: &S) -> Result<Vec<TransactionView>, LedgerError> {
    let transactions = store.list_transactions().await?;
    let receipts = store.list_receipts().await?;
    let allocations = store.list_allocations().await?;
    let members = store.list_members().await?;
    Ok(compose_views(
        &transactions,
        &receipts,
        &allocations,
        &members,
    ))
}
