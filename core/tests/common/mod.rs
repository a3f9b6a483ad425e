// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Mock backend helpers

mod backend;
mod fixtures;

#[allow(unused_imports)]
pub use backend::{mount_event, mount_events, mount_images, wait_until_fetching};
#[allow(unused_imports)]
pub use fixtures::{app_for, app_with_stale_time, sample_event, test_draft};
