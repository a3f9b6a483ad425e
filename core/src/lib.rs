// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Query cache, routing and view state of the Eventful client.

mod config;
mod eventful;
mod source;

pub mod datetime;
pub mod query;
pub mod router;
pub mod views;

pub use crate::config::{APP_NAME, Config, ConfigDuration, expand_path, get_config_dir};
pub use crate::eventful::Eventful;
pub use crate::source::{EventsApi, SharedApi};

pub use eventful_api::{
    ApiConfig, ApiError, CancellationToken, Event, EventDraft, EventId, EventQuery, EventsClient,
    Image,
};
