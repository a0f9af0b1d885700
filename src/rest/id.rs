//! Resource identity.
//!
//! A resource is addressed by a [`ResourceKey`]: its own [`ResourceId`] plus
//! the [`Scope`] it lives in. Hosts and clusters are scoped by a group;
//! snapshots and restore jobs by a group and a cluster. Groups are global.
//!
//! Building identities never fails and never performs I/O. Validation happens
//! when a key is turned into a fetch path, so a malformed id surfaces as
//! [`ResourceError::InvalidId`] on first access.

use std::collections::HashMap;
use std::fmt;

use crate::rest::ResourceError;

/// An opaque identifier naming a resource within its scope.
///
/// MMS identifiers are usually 24-character hex strings, but any token
/// without `/`, `?`, braces, or whitespace is accepted. Numeric ids convert
/// directly.
///
/// # Example
///
/// ```rust
/// use mms::rest::ResourceId;
///
/// let from_str = ResourceId::from("5196d3628d022db4cbc26d9e");
/// let from_number = ResourceId::from(42_u64);
///
/// assert_eq!(from_str.as_str(), "5196d3628d022db4cbc26d9e");
/// assert_eq!(from_number.to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id if it can be placed in a path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] if the id is empty or contains
    /// whitespace or one of `/ ? # { }`.
    pub fn validated(&self) -> Result<&str, ResourceError> {
        let invalid = self.0.is_empty()
            || self
                .0
                .chars()
                .any(|c| {
                    c.is_whitespace() || matches!(c, '/' | '?' | '#' | '{' | '}')
                });

        if invalid {
            return Err(ResourceError::InvalidId {
                id: self.0.clone(),
            });
        }
        Ok(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        Self(id.clone())
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&Self> for ResourceId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parent identities a resource is addressed under.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    group_id: Option<ResourceId>,
    cluster_id: Option<ResourceId>,
}

impl Scope {
    /// The top-level scope, used by groups.
    #[must_use]
    pub const fn global() -> Self {
        Self {
            group_id: None,
            cluster_id: None,
        }
    }

    /// A group scope, used by hosts and clusters.
    #[must_use]
    pub const fn group(group_id: ResourceId) -> Self {
        Self {
            group_id: Some(group_id),
            cluster_id: None,
        }
    }

    /// A cluster scope, used by snapshots and restore jobs.
    #[must_use]
    pub const fn cluster(group_id: ResourceId, cluster_id: ResourceId) -> Self {
        Self {
            group_id: Some(group_id),
            cluster_id: Some(cluster_id),
        }
    }

    /// Returns this scope narrowed to the given cluster, keeping the group.
    #[must_use]
    pub fn with_cluster(self, cluster_id: ResourceId) -> Self {
        Self {
            group_id: self.group_id,
            cluster_id: Some(cluster_id),
        }
    }

    /// Returns the owning group's id, if scoped by a group.
    #[must_use]
    pub const fn group_id(&self) -> Option<&ResourceId> {
        self.group_id.as_ref()
    }

    /// Returns the owning cluster's id, if scoped by a cluster.
    #[must_use]
    pub const fn cluster_id(&self) -> Option<&ResourceId> {
        self.cluster_id.as_ref()
    }

    /// Returns the validated path placeholders this scope provides.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] if a parent id is malformed.
    pub fn ids(&self) -> Result<HashMap<&'static str, &str>, ResourceError> {
        let mut ids = HashMap::new();
        if let Some(group_id) = &self.group_id {
            ids.insert("group_id", group_id.validated()?);
        }
        if let Some(cluster_id) = &self.cluster_id {
            ids.insert("cluster_id", cluster_id.validated()?);
        }
        Ok(ids)
    }
}

/// The full identity of one resource instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    scope: Scope,
    id: ResourceId,
}

impl ResourceKey {
    /// Creates a key from a scope and an id.
    #[must_use]
    pub const fn new(scope: Scope, id: ResourceId) -> Self {
        Self { scope, id }
    }

    /// Returns the scope.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the resource's own id.
    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns the validated path placeholders this key provides, including `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] if any id is malformed.
    pub fn ids(&self) -> Result<HashMap<&'static str, &str>, ResourceError> {
        let mut ids = self.scope.ids()?;
        ids.insert("id", self.id.validated()?);
        Ok(ids)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group_id) = &self.scope.group_id {
            write!(f, "{group_id}/")?;
        }
        if let Some(cluster_id) = &self.scope.cluster_id {
            write!(f, "{cluster_id}/")?;
        }
        write!(f, "{}", self.id)
    }
}

// Verify identity types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceId>();
    assert_send_sync::<Scope>();
    assert_send_sync::<ResourceKey>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_hex_and_numeric_ids() {
        assert_eq!(
            ResourceId::from("680ab316473d6b28f966364b947134fc")
                .validated()
                .unwrap(),
            "680ab316473d6b28f966364b947134fc"
        );
        assert_eq!(ResourceId::from(7_u64).validated().unwrap(), "7");
    }

    #[test]
    fn test_validated_rejects_unsafe_ids() {
        for id in ["", "a/b", "a b", "x?y", "frag#1", "tab\t", "{id}", "{group_id}", "a}"] {
            let rid = ResourceId::from(id);
            let result = rid.validated();
            assert!(
                matches!(result, Err(ResourceError::InvalidId { .. })),
                "expected '{id}' to be rejected"
            );
        }
    }

    #[test]
    fn test_key_ids_include_scope_and_id() {
        let key = ResourceKey::new(
            Scope::cluster("g1".into(), "c1".into()),
            "s1".into(),
        );
        let ids = key.ids().unwrap();

        assert_eq!(ids.get("group_id"), Some(&"g1"));
        assert_eq!(ids.get("cluster_id"), Some(&"c1"));
        assert_eq!(ids.get("id"), Some(&"s1"));
    }

    #[test]
    fn test_key_ids_fail_on_malformed_parent() {
        let key = ResourceKey::new(Scope::group("".into()), "abc".into());
        assert!(matches!(key.ids(), Err(ResourceError::InvalidId { id }) if id.is_empty()));
    }

    #[test]
    fn test_with_cluster_keeps_group() {
        let scope = Scope::group("g1".into()).with_cluster("c1".into());
        assert_eq!(scope, Scope::cluster("g1".into(), "c1".into()));
        assert!(Scope::global().with_cluster("c1".into()).group_id().is_none());
    }

    #[test]
    fn test_key_display_joins_identities() {
        let key = ResourceKey::new(Scope::group("g1".into()), "abc".into());
        assert_eq!(key.to_string(), "g1/abc");
        assert_eq!(
            ResourceKey::new(Scope::global(), "g1".into()).to_string(),
            "g1"
        );
    }
}
