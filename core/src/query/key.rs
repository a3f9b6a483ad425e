// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use eventful_api::EventId;

/// One segment of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyPart {
    /// A plain name or id, e.g. `"events"` or `"42"`.
    Name(String),
    /// Named parameters, e.g. `{search: "rust"}`.
    Params(BTreeMap<String, String>),
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name:?}"),
            Self::Params(params) => {
                write!(f, "{{")?;
                for (i, (k, v)) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{k}:{v:?}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Composite identifier of a cached read.
///
/// Keys are compared segment by segment, and invalidation matches by prefix:
/// invalidating `["events"]` touches `["events", "42"]` and
/// `["events", {search: "rust"}]` as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    /// Creates a key from its parts.
    #[must_use]
    pub const fn new(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }

    /// `["events"]`, the list of all events.
    #[must_use]
    pub fn events() -> Self {
        Self(vec!["events".into()])
    }

    /// `["events", id]`, a single event.
    #[must_use]
    pub fn event(id: &EventId) -> Self {
        Self(vec!["events".into(), KeyPart::Name(id.to_string())])
    }

    /// `["events", {search: term}]`, the results of a search.
    #[must_use]
    pub fn search(term: &str) -> Self {
        let params = BTreeMap::from([("search".to_string(), term.to_string())]);
        Self(vec!["events".into(), KeyPart::Params(params)])
    }

    /// `["events-images"]`, the selectable images.
    #[must_use]
    pub fn images() -> Self {
        Self(vec!["events-images".into()])
    }

    /// The parts of this key.
    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// Whether `prefix` matches the leading parts of this key.
    #[must_use]
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, "]")
    }
}
