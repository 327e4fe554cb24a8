use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// A permission/role label granted to a principal (e.g. `USER`, `ADMIN`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Authority {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Authority {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// An identity known to the principal store, plus the authorities granted to it.
///
/// Authorities are kept in a `BTreeSet` so responses and comparisons are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identity: String,
    authorities: BTreeSet<Authority>,
}

impl Principal {
    pub fn new<I, A>(identity: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        Self {
            identity: identity.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn authorities(&self) -> &BTreeSet<Authority> {
        &self.authorities
    }

    pub fn has_authority(&self, label: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == label)
    }
}
