//! Fetch path templates.
//!
//! Each resource type declares its paths as a static table of
//! [`ResourcePath`]s. A template names the ids it needs as `{placeholders}`;
//! resolution picks the most specific template whose ids are all available
//! and fills them in.
//!
//! # Example
//!
//! ```rust
//! use mms::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(ResourceOperation::Find, &["group_id", "id"], "/groups/{group_id}/hosts/{id}"),
//!     ResourcePath::new(ResourceOperation::All, &["group_id"], "/groups/{group_id}/hosts"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["group_id", "id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("group_id", "g1");
//! ids.insert("id", "abc");
//! assert_eq!(build_path(path.template, &ids), "/groups/g1/hosts/abc");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

/// The read operations a path template serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource by identity.
    Find,
    /// Fetch the list of resources in a scope.
    All,
}

impl ResourceOperation {
    /// Returns the operation name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::All => "all",
        }
    }
}

/// A path template for one operation of one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The operation this path serves.
    pub operation: ResourceOperation,
    /// The ids the template requires.
    pub ids: &'static [&'static str],
    /// The template, e.g. `/groups/{group_id}/hosts/{id}`.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a path template.
    #[must_use]
    pub const fn new(
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            operation,
            ids,
            template,
        }
    }

    /// Returns how many ids the template requires.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if every required id is available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for `operation` given the available ids.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Replaces each `{key}` placeholder in `template` with its value.
///
/// Substitution is a single left-to-right pass over the template, so text
/// inside a substituted value is never treated as a placeholder. Unknown
/// placeholders are kept verbatim.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            result.push_str(&rest[open..]);
            return result;
        };

        let key = &after[..close];
        match ids.get(key) {
            Some(value) => result.push_str(&value.to_string()),
            None => result.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }

    result.push_str(rest);
    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
