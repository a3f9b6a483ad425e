// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Shared query cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use eventful_api::{ApiError, CancellationToken};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::query::key::QueryKey;
use crate::query::observer::QueryObserver;
use crate::query::state::{Data, QueryState, Snapshot};

/// Timing options of the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long fetched data counts as fresh. Fresh data is served without a request.
    pub stale_time: Duration,
    /// How long an unobserved entry is kept before garbage collection.
    pub gc_time: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(5 * 60),
        }
    }
}

/// Errors returned by [`QueryClient::fetch_query`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// The fetcher failed.
    #[error("{0}")]
    Api(Arc<ApiError>),

    /// The fetch was cancelled, superseded or invalidated before it settled.
    #[error("Query was cancelled")]
    Cancelled,

    /// The cached value under this key has a different type.
    #[error("Cached value for {0} has an unexpected type")]
    TypeMismatch(QueryKey),
}

impl QueryError {
    /// The API error, if the fetch failed on the server or the network.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Handle to the shared query cache.
///
/// Cloning is cheap: all clones share the same entries. The cache is only ever
/// changed through [`fetch_query`](Self::fetch_query),
/// [`set_query_data`](Self::set_query_data),
/// [`invalidate_queries`](Self::invalidate_queries),
/// [`cancel_queries`](Self::cancel_queries) and
/// [`collect_garbage`](Self::collect_garbage).
#[derive(Debug, Clone)]
pub struct QueryClient {
    inner: Arc<Mutex<Inner>>,
    options: QueryOptions,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    next_fetch_id: u64,
}

#[derive(Debug)]
struct Entry {
    tx: watch::Sender<Snapshot>,
    observers: usize,
    inactive_since: Option<Instant>,
    in_flight: Option<InFlight>,
}

#[derive(Debug)]
struct InFlight {
    id: u64,
    signal: CancellationToken,
}

impl Entry {
    fn new(now: Instant) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self {
            tx,
            observers: 0,
            inactive_since: Some(now),
            in_flight: None,
        }
    }

    /// Fires the abort signal of the in-flight fetch and settles back to the
    /// previous state.
    fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(fetch) => {
                fetch.signal.cancel();
                self.tx.send_modify(|s| s.fetching = false);
                true
            }
            None => false,
        }
    }
}

/// Frees the in-flight slot of a fetch whose future is dropped before it
/// settles, so waiters resolve and the key can be fetched again.
struct FetchGuard<'a> {
    client: &'a QueryClient,
    key: &'a QueryKey,
    fetch_id: u64,
    settled: bool,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.client.lock();
        if let Some(entry) = inner.entries.get_mut(self.key)
            && entry
                .in_flight
                .as_ref()
                .is_some_and(|fetch| fetch.id == self.fetch_id)
            && entry.cancel()
        {
            tracing::debug!(key = %self.key, fetch_id = self.fetch_id, "released dropped fetch");
        }
    }
}

enum Begin {
    Cached(Data),
    Wait(u64, watch::Receiver<Snapshot>),
    Fetch(u64, CancellationToken),
}

impl QueryClient {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(options: QueryOptions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            options,
        }
    }

    /// The timing options of this cache.
    #[must_use]
    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Reads `key`, fetching it with `fetcher` unless fresh data is cached.
    ///
    /// Concurrent calls for the same key share one fetch. The fetcher receives the
    /// abort signal of the fetch and should hand it to the network layer.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Api`] if the fetch failed and
    /// [`QueryError::Cancelled`] if it was cancelled before it settled.
    pub async fn fetch_query<T, F, Fut>(
        &self,
        key: QueryKey,
        fetcher: F,
    ) -> Result<Arc<T>, QueryError>
    where
        T: Send + Sync + 'static,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match self.begin_fetch(&key) {
            Begin::Cached(data) => {
                tracing::debug!(%key, "serving fresh data from cache");
                downcast(&key, data)
            }
            Begin::Wait(fetch_id, rx) => {
                tracing::debug!(%key, fetch_id, "joining in-flight fetch");
                Self::wait_for(&key, fetch_id, rx).await
            }
            Begin::Fetch(fetch_id, signal) => {
                tracing::debug!(%key, fetch_id, "fetching");
                let mut guard = FetchGuard {
                    client: self,
                    key: &key,
                    fetch_id,
                    settled: false,
                };
                let result = fetcher(signal).await;
                guard.settled = true;
                self.settle(&key, fetch_id, result)
            }
        }
    }

    fn begin_fetch(&self, key: &QueryKey) -> Begin {
        let now = Instant::now();
        let stale_time = self.options.stale_time;
        let mut inner = self.lock();
        inner.next_fetch_id += 1;
        let fetch_id = inner.next_fetch_id;

        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(now));

        {
            let snapshot = entry.tx.borrow();
            if snapshot.is_fresh(now, stale_time)
                && let Some(data) = snapshot.data.clone()
            {
                return Begin::Cached(data);
            }
        }

        if let Some(fetch) = &entry.in_flight {
            return Begin::Wait(fetch.id, entry.tx.subscribe());
        }

        let signal = CancellationToken::new();
        entry.in_flight = Some(InFlight {
            id: fetch_id,
            signal: signal.clone(),
        });
        entry.tx.send_modify(|s| s.fetching = true);
        Begin::Fetch(fetch_id, signal)
    }

    fn settle<T: Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        fetch_id: u64,
        result: Result<T, ApiError>,
    ) -> Result<Arc<T>, QueryError> {
        let mut inner = self.lock();
        let Some(entry) = inner.entries.get_mut(key) else {
            return Err(QueryError::Cancelled);
        };
        if entry.in_flight.as_ref().map(|fetch| fetch.id) != Some(fetch_id) {
            tracing::debug!(%key, fetch_id, "discarding superseded fetch");
            return Err(QueryError::Cancelled);
        }
        entry.in_flight = None;

        match result {
            Ok(value) => {
                let value = Arc::new(value);
                let data: Data = value.clone();
                entry.tx.send_modify(|s| {
                    s.data = Some(data);
                    s.error = None;
                    s.fetching = false;
                    s.invalidated = false;
                    s.updated_at = Some(Instant::now());
                    s.settled_by = Some(fetch_id);
                });
                tracing::debug!(%key, fetch_id, "fetch succeeded");
                Ok(value)
            }
            Err(ApiError::Aborted) => {
                entry.tx.send_modify(|s| s.fetching = false);
                Err(QueryError::Cancelled)
            }
            Err(err) => {
                tracing::debug!(%key, fetch_id, %err, "fetch failed");
                let err = Arc::new(err);
                entry.tx.send_modify(|s| {
                    s.error = Some(err.clone());
                    s.fetching = false;
                    s.settled_by = Some(fetch_id);
                });
                Err(QueryError::Api(err))
            }
        }
    }

    async fn wait_for<T: Send + Sync + 'static>(
        key: &QueryKey,
        fetch_id: u64,
        mut rx: watch::Receiver<Snapshot>,
    ) -> Result<Arc<T>, QueryError> {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if !snapshot.fetching {
                    if snapshot.settled_by != Some(fetch_id) {
                        return Err(QueryError::Cancelled);
                    }
                    return match snapshot.state::<T>() {
                        QueryState::Ready(v) => Ok(v),
                        QueryState::Error(e) => Err(QueryError::Api(e)),
                        QueryState::Idle | QueryState::Pending => {
                            Err(QueryError::TypeMismatch(key.clone()))
                        }
                    };
                }
            }
            if rx.changed().await.is_err() {
                return Err(QueryError::Cancelled);
            }
        }
    }

    /// Marks every entry under `prefix` stale and cancels fetches that started
    /// before the invalidation. Returns how many entries were touched.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.lock();
        let mut count = 0;
        for (key, entry) in &mut inner.entries {
            if key.starts_with(prefix) {
                entry.cancel();
                entry.tx.send_modify(|s| s.invalidated = true);
                count += 1;
            }
        }
        tracing::debug!(%prefix, count, "invalidated queries");
        count
    }

    /// Fires the abort signal of in-flight fetches under `prefix`.
    /// Returns how many fetches were cancelled.
    pub fn cancel_queries(&self, prefix: &QueryKey) -> usize {
        let mut inner = self.lock();
        let count = inner
            .entries
            .iter_mut()
            .filter(|(key, _)| key.starts_with(prefix))
            .filter(|(_, entry)| entry.in_flight.is_some())
            .map(|(_, entry)| entry.cancel())
            .filter(|cancelled| *cancelled)
            .count();
        if count > 0 {
            tracing::debug!(%prefix, count, "cancelled queries");
        }
        count
    }

    /// Stores `value` under `key` as freshly fetched data.
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) -> Arc<T> {
        let now = Instant::now();
        let value = Arc::new(value);
        let data: Data = value.clone();
        let mut inner = self.lock();
        let entry = inner
            .entries
            .entry(key)
            .or_insert_with(|| Entry::new(now));
        entry.tx.send_modify(|s| {
            s.data = Some(data);
            s.error = None;
            s.invalidated = false;
            s.updated_at = Some(now);
        });
        value
    }

    /// Cached data under `key`, if any and of type `T`.
    #[must_use]
    pub fn get_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        let data = entry.tx.borrow().data.clone()?;
        data.downcast().ok()
    }

    /// Current state of `key`.
    #[must_use]
    pub fn query_state<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let inner = self.lock();
        match inner.entries.get(key) {
            Some(entry) => entry.tx.borrow().state(),
            None => QueryState::Pending,
        }
    }

    /// Whether `key` has an in-flight fetch.
    #[must_use]
    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        let inner = self.lock();
        inner
            .entries
            .get(key)
            .is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Subscribes to `key`, creating the entry if needed.
    ///
    /// The entry stays out of garbage collection while observed. Dropping the
    /// last observer cancels an in-flight fetch of the entry.
    #[must_use]
    pub fn observe(&self, key: QueryKey) -> QueryObserver {
        let now = Instant::now();
        let rx = {
            let mut inner = self.lock();
            let entry = inner
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(now));
            entry.observers += 1;
            entry.inactive_since = None;
            entry.tx.subscribe()
        };
        QueryObserver::new(self.clone(), key, rx)
    }

    pub(crate) fn release(&self, key: &QueryKey) {
        let mut inner = self.lock();
        let Some(entry) = inner.entries.get_mut(key) else {
            return;
        };
        entry.observers = entry.observers.saturating_sub(1);
        if entry.observers == 0 {
            entry.inactive_since = Some(Instant::now());
            if entry.cancel() {
                tracing::debug!(%key, "cancelled fetch of unobserved query");
            }
        }
    }

    /// Removes unobserved, settled entries that have been inactive for at least
    /// `gc_time`. Returns how many were removed.
    pub fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.options.gc_time;
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| {
            entry.observers > 0
                || entry.in_flight.is_some()
                || entry
                    .inactive_since
                    .is_none_or(|since| now.duration_since(since) < gc_time)
        });
        let removed = before - inner.entries.len();
        if removed > 0 {
            tracing::debug!(removed, "collected inactive queries");
        }
        removed
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` has a cache entry.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, data: Data) -> Result<Arc<T>, QueryError> {
    data.downcast()
        .map_err(|_| QueryError::TypeMismatch(key.clone()))
}
