// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_api::EventDraft;

use crate::datetime::{parse_date, parse_time};

/// A draft that cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// A required field is empty.
    #[error("The {0} is required")]
    Missing(&'static str),

    /// The date is not `YYYY-MM-DD`.
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The time is not `HH:MM`.
    #[error("Invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
}

/// Checks a draft before it is sent.
///
/// # Errors
///
/// Returns the first problem found.
pub fn validate(draft: &EventDraft) -> Result<(), DraftError> {
    let required = [
        ("title", &draft.title),
        ("description", &draft.description),
        ("date", &draft.date),
        ("time", &draft.time),
        ("location", &draft.location),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(DraftError::Missing(name));
        }
    }

    if parse_date(&draft.date).is_none() {
        return Err(DraftError::InvalidDate(draft.date.clone()));
    }
    if parse_time(&draft.time).is_none() {
        return Err(DraftError::InvalidTime(draft.time.clone()));
    }
    Ok(())
}
