//! Enumeration of resources.
//!
//! MMS list endpoints answer with a page envelope:
//!
//! ```json
//! {"results": [{"id": "...", ...}, ...], "totalCount": 42}
//! ```
//!
//! [`fetch_list`] turns each entry into a pre-loaded [`Lazy`] resource keyed
//! by the entry's `id`. Entries are never re-fetched individually.
//!
//! [`ResourceList<R>`] implements `Deref<Target = [Lazy<R>]>`, so it can be
//! iterated and indexed like a slice:
//!
//! ```rust,ignore
//! let groups = client.groups(None).await?;
//! for group in groups.iter() {
//!     println!("{}: {}", group.id(), group.name().await?);
//! }
//! println!("{} of {:?}", groups.len(), groups.total_count());
//! ```

use std::ops::Deref;

use serde_json::Value;

use crate::clients::{Client, Document};
use crate::rest::{Lazy, RemoteResource, ResourceError, ResourceId, ResourceKey, Scope};

/// Paging parameters for list requests.
///
/// Both parameters are optional; the service defaults to page 1 of 100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    page_num: Option<u32>,
    items_per_page: Option<u32>,
}

impl ListParams {
    /// Creates empty paging parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_num: None,
            items_per_page: None,
        }
    }

    /// Selects a 1-based page.
    #[must_use]
    pub const fn page_num(mut self, page_num: u32) -> Self {
        self.page_num = Some(page_num);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    /// Renders the parameters as a query string in a fixed order, or `None`
    /// if no parameter is set.
    #[must_use]
    pub fn query_string(&self) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(page_num) = self.page_num {
            pairs.push(format!("pageNum={page_num}"));
        }
        if let Some(items_per_page) = self.items_per_page {
            pairs.push(format!("itemsPerPage={items_per_page}"));
        }

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("&"))
        }
    }
}

/// One page of pre-loaded resources.
pub struct ResourceList<R: RemoteResource> {
    items: Vec<Lazy<R>>,
    total_count: Option<u64>,
}

impl<R: RemoteResource> ResourceList<R> {
    /// Returns the total number of resources across all pages, if reported.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Consumes the list, returning its resources.
    #[must_use]
    pub fn into_inner(self) -> Vec<Lazy<R>> {
        self.items
    }
}

impl<R: RemoteResource> Deref for ResourceList<R> {
    type Target = [Lazy<R>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<R: RemoteResource> IntoIterator for ResourceList<R> {
    type Item = Lazy<R>;
    type IntoIter = std::vec::IntoIter<Lazy<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<R: RemoteResource + std::fmt::Debug> std::fmt::Debug for ResourceList<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceList")
            .field("items", &self.items)
            .field("total_count", &self.total_count)
            .finish()
    }
}

/// Fetches the list of `R` in `scope` and returns its entries pre-loaded.
///
/// # Errors
///
/// Returns [`ResourceError`] if the path cannot be resolved, the fetch fails,
/// the envelope has no `results` array, or an entry lacks an `id` or does
/// not map onto `R`.
pub async fn fetch_list<R: RemoteResource>(
    client: &Client,
    scope: Scope,
    params: Option<ListParams>,
) -> Result<ResourceList<R>, ResourceError> {
    let path = R::list_path(&scope, params.as_ref())?;
    tracing::debug!(resource = R::NAME, %path, "Listing resources");

    let document = client
        .get(&path)
        .await
        .map_err(|e| ResourceError::from_transport(e, R::NAME, &path))?;

    let results = document
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ResourceError::Decode {
            resource: R::NAME,
            message: format!("list response from {path} has no `results` array"),
        })?;

    let mut items = Vec::with_capacity(results.len());
    for entry in results {
        let id = entry_id::<R>(entry)?;
        let entry_document = Document::try_from(entry.clone())
            .map_err(|e| ResourceError::from_transport(e, R::NAME, id.as_str()))?;
        let key = ResourceKey::new(scope.clone(), id);
        items.push(Lazy::from_document(client.clone(), key, &entry_document)?);
    }

    Ok(ResourceList {
        items,
        total_count: document.get("totalCount").and_then(Value::as_u64),
    })
}

fn entry_id<R: RemoteResource>(entry: &Value) -> Result<ResourceId, ResourceError> {
    match entry.get("id") {
        Some(Value::String(id)) => Ok(ResourceId::from(id)),
        Some(Value::Number(id)) => Ok(ResourceId::from(id.to_string())),
        _ => Err(ResourceError::Decode {
            resource: R::NAME,
            message: "list entry has no `id`".to_string(),
        }),
    }
}
