// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use tokio::sync::watch;

use crate::query::client::QueryClient;
use crate::query::key::QueryKey;
use crate::query::state::{QueryState, Snapshot};

/// Subscription to one cache entry.
///
/// Keeps the entry out of garbage collection. Dropping the last observer of an
/// entry cancels its in-flight fetch.
#[derive(Debug)]
pub struct QueryObserver {
    client: QueryClient,
    key: QueryKey,
    rx: watch::Receiver<Snapshot>,
}

impl QueryObserver {
    pub(crate) fn new(client: QueryClient, key: QueryKey, rx: watch::Receiver<Snapshot>) -> Self {
        Self { client, key, rx }
    }

    /// Current state of the entry.
    #[must_use]
    pub fn state<T: Send + Sync + 'static>(&self) -> QueryState<T> {
        self.rx.borrow().state()
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.rx.borrow().fetching
    }

    /// Whether the entry should be loaded: it never settled or was invalidated,
    /// and nothing is in flight.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        let snapshot = self.rx.borrow();
        let settled = snapshot.data.is_some() || snapshot.error.is_some();
        !snapshot.fetching && (!settled || snapshot.invalidated)
    }
}

impl Drop for QueryObserver {
    fn drop(&mut self) {
        self.client.release(&self.key);
    }
}
