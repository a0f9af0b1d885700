//! Lazy, identity-addressed resources.
//!
//! This module provides the object model on top of the
//! [`Client`](crate::clients::Client):
//!
//! - **[`Lazy<R>`]**: a resource that loads its fields on first access
//! - **[`RemoteResource`] trait**: path templates and document mapping for one type
//! - **Identity**: [`ResourceId`], [`Scope`], [`ResourceKey`]
//! - **Path building**: [`ResourcePath`], [`get_path`], [`build_path`]
//! - **Enumeration**: [`ResourceList<R>`] and [`ListParams`]
//! - **[`ResourceError`]**: not-found, unauthorized, transport, and decode failures
//!
//! Concrete types live in [`resources`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mms::{CachePolicy, Client};
//!
//! let client = Client::from_config(&config)?;
//!
//! for group in client.groups(None).await?.iter() {
//!     for host in group.hosts(None).await?.iter() {
//!         println!("{} {}", host.hostname().await?, host.type_name().await?);
//!     }
//! }
//! ```

mod errors;
mod id;
mod lazy;
mod path;
mod resource;
mod response;

pub mod resources;

pub use errors::ResourceError;
pub use id::{ResourceId, ResourceKey, Scope};
pub use lazy::Lazy;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::{decode, RemoteResource};
pub use response::{fetch_list, ListParams, ResourceList};
