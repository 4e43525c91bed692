//! Domain (tenant/namespace) scoping for role assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when joining scope parts into a storage key.
const SCOPE_SEPARATOR: &str = "/";

/// An ordered sequence of scope strings qualifying a role assignment.
///
/// The empty sequence is the global scope. Two scopes are equal when their
/// parts are equal in order. Deserialization goes through
/// [`DomainScope::new`], so empty parts never survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DomainScope(Vec<String>);

impl DomainScope {
    /// The global (unscoped) domain.
    pub fn global() -> Self {
        Self(Vec::new())
    }

    /// Builds a scope from its ordered parts. Empty parts are dropped.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            parts
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        )
    }

    /// Parses a storage key produced by [`DomainScope::key`].
    pub fn from_key(key: &str) -> Self {
        Self::new(key.split(SCOPE_SEPARATOR))
    }

    /// Whether this is the global scope.
    pub fn is_global(&self) -> bool {
        self.0.is_empty()
    }

    /// The ordered scope parts.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Canonical storage key; the empty string for the global scope.
    pub fn key(&self) -> String {
        self.0.join(SCOPE_SEPARATOR)
    }
}

impl fmt::Display for DomainScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(f, "<global>")
        } else {
            write!(f, "{}", self.key())
        }
    }
}

impl From<&str> for DomainScope {
    fn from(value: &str) -> Self {
        Self::new([value])
    }
}

impl From<String> for DomainScope {
    fn from(value: String) -> Self {
        Self::new([value])
    }
}

impl From<Vec<String>> for DomainScope {
    fn from(parts: Vec<String>) -> Self {
        Self::new(parts)
    }
}

impl From<DomainScope> for Vec<String> {
    fn from(scope: DomainScope) -> Self {
        scope.0
    }
}

impl From<Option<&str>> for DomainScope {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}
