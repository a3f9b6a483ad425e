// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use eventful_api::ApiError;
use tokio::time::Instant;

pub(crate) type Data = Arc<dyn Any + Send + Sync>;

/// Observable state of one cache entry.
#[derive(Clone, Default)]
pub(crate) struct Snapshot {
    pub data: Option<Data>,
    pub error: Option<Arc<ApiError>>,
    pub fetching: bool,
    pub invalidated: bool,
    pub updated_at: Option<Instant>,
    /// Id of the fetch that last settled this entry.
    pub settled_by: Option<u64>,
}

impl Snapshot {
    pub fn state<T: Send + Sync + 'static>(&self) -> QueryState<T> {
        if let Some(data) = self.data.clone().and_then(|d| d.downcast::<T>().ok()) {
            QueryState::Ready(data)
        } else if let Some(err) = &self.error {
            QueryState::Error(err.clone())
        } else {
            QueryState::Pending
        }
    }

    pub fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        match (&self.data, self.updated_at) {
            (Some(_), Some(at)) if !self.invalidated => now.duration_since(at) < stale_time,
            _ => false,
        }
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("has_data", &self.data.is_some())
            .field("error", &self.error)
            .field("fetching", &self.fetching)
            .field("invalidated", &self.invalidated)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

/// State of a read as seen by a view.
#[derive(Debug)]
pub enum QueryState<T> {
    /// The read is disabled and has not been requested.
    Idle,
    /// No data yet, a fetch is pending or about to start.
    Pending,
    /// The last fetch failed and there is no data to show.
    Error(Arc<ApiError>),
    /// Data is available. It may be refetching in the background.
    Ready(Arc<T>),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Pending => Self::Pending,
            Self::Error(e) => Self::Error(e.clone()),
            Self::Ready(v) => Self::Ready(v.clone()),
        }
    }
}

impl<T> QueryState<T> {
    /// The data, if ready.
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// The error, if the read failed.
    pub fn error(&self) -> Option<&Arc<ApiError>> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the read is waiting for its first result.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
