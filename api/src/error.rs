// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// Events API client errors.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Network or transport failure, no response was received.
    #[error("HTTP error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Request failed with status {code}{}", message_suffix(.info.as_ref()))]
    Status {
        /// HTTP status code.
        code: u16,
        /// Parsed JSON error body, if the body was JSON.
        info: Option<Value>,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid server response: {0}")]
    Decode(String),

    /// The request was cancelled through its abort signal.
    #[error("Request aborted")]
    Aborted,

    /// The configured base URL or a derived URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status code, if the server answered.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Parsed error body supplied by the server.
    #[must_use]
    pub fn info(&self) -> Option<&Value> {
        match self {
            Self::Status { info, .. } => info.as_ref(),
            _ => None,
        }
    }

    /// The `message` field of the server error body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.info()
            .and_then(|info| info.get("message"))
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
    }

    /// Whether this error only reports a client-side abort.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

fn message_suffix(info: Option<&Value>) -> String {
    match info.and_then(|i| i.get("message")).and_then(Value::as_str) {
        Some(msg) => format!(": {msg}"),
        None => String::new(),
    }
}
