// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Query cache: keyed reads with invalidation, plus write tracking.

mod client;
mod key;
mod mutation;
mod observer;
mod state;

pub use crate::query::client::{QueryClient, QueryError, QueryOptions};
pub use crate::query::key::{KeyPart, QueryKey};
pub use crate::query::mutation::{Mutation, MutationState};
pub use crate::query::observer::QueryObserver;
pub use crate::query::state::QueryState;
