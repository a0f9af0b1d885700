//! The capability every resource type supplies.
//!
//! A resource type is a plain data struct plus an implementation of
//! [`RemoteResource`]: where its document lives ([`RemoteResource::PATHS`])
//! and how a document becomes its fields ([`RemoteResource::apply`]). It holds
//! no state-machine or caching logic; [`Lazy`](crate::rest::Lazy) does that.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use mms::rest::{RemoteResource, ResourceOperation, ResourcePath};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct Alert {
//!     pub type_name: String,
//!     pub status: Option<String>,
//! }
//!
//! impl RemoteResource for Alert {
//!     const NAME: &'static str = "Alert";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(ResourceOperation::Find, &["group_id", "id"], "/groups/{group_id}/alerts/{id}"),
//!         ResourcePath::new(ResourceOperation::All, &["group_id"], "/groups/{group_id}/alerts"),
//!     ];
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::Document;
use crate::rest::{
    build_path, get_path, ListParams, ResourceError, ResourceKey, ResourceOperation, ResourcePath,
    Scope,
};

/// Path resolution and document mapping for one resource type.
pub trait RemoteResource: DeserializeOwned + Send + Sync + Sized + 'static {
    /// Type name used in errors and logs (e.g. "Host").
    const NAME: &'static str;

    /// Path templates for [`ResourceOperation::Find`] and [`ResourceOperation::All`].
    const PATHS: &'static [ResourcePath];

    /// Returns the fetch path for the resource identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for malformed ids and
    /// [`ResourceError::PathResolutionFailed`] if no template matches the
    /// key's scope.
    fn resolve_path(key: &ResourceKey) -> Result<String, ResourceError> {
        let ids = key.ids()?;
        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, ResourceOperation::Find, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: ResourceOperation::Find.as_str(),
            },
        )?;

        Ok(build_path(path.template, &ids))
    }

    /// Returns the list path for resources of this type in `scope`.
    ///
    /// Paging parameters, when given, are appended as a query string and so
    /// become part of the cache key.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidId`] for malformed parent ids and
    /// [`ResourceError::PathResolutionFailed`] if no template matches.
    fn list_path(scope: &Scope, params: Option<&ListParams>) -> Result<String, ResourceError> {
        let ids = scope.ids()?;
        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, ResourceOperation::All, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: ResourceOperation::All.as_str(),
            },
        )?;

        let mut url = build_path(path.template, &ids);
        if let Some(query) = params.and_then(ListParams::query_string) {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }

    /// Maps a document onto this type's fields.
    ///
    /// The default decodes the document with serde; types with derived fields
    /// override it and call [`decode`] first.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if a required field is missing or a
    /// field has the wrong type.
    fn apply(document: &Document) -> Result<Self, ResourceError> {
        decode(document)
    }
}

/// Decodes `document` into `R` by wire field name.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] naming the first missing or mistyped field.
pub fn decode<R: RemoteResource>(document: &Document) -> Result<R, ResourceError> {
    <R as Deserialize>::deserialize(document.as_value()).map_err(|e| ResourceError::Decode {
        resource: R::NAME,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Agent {
        host_name: String,
        conf_count: Option<u32>,
    }

    impl RemoteResource for Agent {
        const NAME: &'static str = "Agent";
        const PATHS: &'static [ResourcePath] = &[
            ResourcePath::new(
                ResourceOperation::Find,
                &["group_id", "id"],
                "/groups/{group_id}/agents/{id}",
            ),
            ResourcePath::new(
                ResourceOperation::All,
                &["group_id"],
                "/groups/{group_id}/agents",
            ),
        ];
    }

    #[test]
    fn test_resolve_path_uses_find_template() {
        let key = ResourceKey::new(Scope::group("g1".into()), "a1".into());
        assert_eq!(Agent::resolve_path(&key).unwrap(), "/groups/g1/agents/a1");
    }

    #[test]
    fn test_resolve_path_fails_without_required_scope() {
        let key = ResourceKey::new(Scope::global(), "a1".into());
        assert_eq!(
            Agent::resolve_path(&key),
            Err(ResourceError::PathResolutionFailed {
                resource: "Agent",
                operation: "find"
            })
        );
    }

    #[test]
    fn test_list_path_appends_paging_parameters() {
        let scope = Scope::group("g1".into());
        assert_eq!(
            Agent::list_path(&scope, None).unwrap(),
            "/groups/g1/agents"
        );

        let params = ListParams::new().page_num(2).items_per_page(50);
        assert_eq!(
            Agent::list_path(&scope, Some(&params)).unwrap(),
            "/groups/g1/agents?pageNum=2&itemsPerPage=50"
        );
    }

    #[test]
    fn test_apply_decodes_by_wire_name() {
        let document =
            Document::try_from(json!({"hostName": "agent-1", "confCount": 3, "extra": true}))
                .unwrap();
        assert_eq!(
            Agent::apply(&document).unwrap(),
            Agent {
                host_name: "agent-1".to_string(),
                conf_count: Some(3),
            }
        );
    }

    #[test]
    fn test_apply_rejects_missing_required_field() {
        let document = Document::try_from(json!({"confCount": 3})).unwrap();
        let error = Agent::apply(&document).unwrap_err();

        assert!(
            matches!(error, ResourceError::Decode { resource: "Agent", ref message } if message.contains("hostName"))
        );
    }

    #[test]
    fn test_apply_rejects_mistyped_field() {
        let document =
            Document::try_from(json!({"hostName": "agent-1", "confCount": "three"})).unwrap();
        assert!(matches!(
            Agent::apply(&document),
            Err(ResourceError::Decode { .. })
        ));
    }
}
