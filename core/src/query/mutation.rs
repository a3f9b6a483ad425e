// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::ApiError;
use tokio::sync::watch;

/// State of a tracked write.
#[derive(Debug)]
pub enum MutationState<T> {
    /// Not started, or reset.
    Idle,
    /// The write is in flight.
    Pending,
    /// The write failed.
    Error(Arc<ApiError>),
    /// The write succeeded.
    Success(Arc<T>),
}

impl<T> Clone for MutationState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Pending => Self::Pending,
            Self::Error(e) => Self::Error(e.clone()),
            Self::Success(v) => Self::Success(v.clone()),
        }
    }
}

impl<T> MutationState<T> {
    /// The error of the last attempt, if it failed.
    pub fn error(&self) -> Option<&Arc<ApiError>> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The result of the last attempt, if it succeeded.
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }
}

/// Tracks one write operation, independent of the query cache.
///
/// Clones share the same state, so a spawned task can run
/// [`mutate`](Self::mutate) while the view reads [`state`](Self::state).
#[derive(Debug)]
pub struct Mutation<T> {
    tx: Arc<watch::Sender<MutationState<T>>>,
}

impl<T> Clone for Mutation<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Default for Mutation<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mutation<T> {
    /// Creates an idle mutation.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(MutationState::Idle);
        Self { tx: Arc::new(tx) }
    }

    /// Runs the write, recording pending and then its outcome.
    ///
    /// # Errors
    ///
    /// Returns the error of the write.
    pub async fn mutate<F>(&self, write: F) -> Result<Arc<T>, Arc<ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.tx.send_replace(MutationState::Pending);
        match write.await {
            Ok(value) => {
                let value = Arc::new(value);
                self.tx.send_replace(MutationState::Success(value.clone()));
                Ok(value)
            }
            Err(err) => {
                let err = Arc::new(err);
                self.tx.send_replace(MutationState::Error(err.clone()));
                Err(err)
            }
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MutationState<T> {
        self.tx.borrow().clone()
    }

    /// Whether the write is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(*self.tx.borrow(), MutationState::Pending)
    }

    /// Back to idle, clearing a previous error.
    pub fn reset(&self) {
        self.tx.send_replace(MutationState::Idle);
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MutationState<T>> {
        self.tx.subscribe()
    }
}
