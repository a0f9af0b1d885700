//! Concrete resource types, organized by API version.
//!
//! ```text
//! resources/
//!   mod.rs           <- This file (re-exports latest version)
//!   v1_0/
//!     mod.rs         <- Version-specific resources
//! ```
//!
//! Each type is a plain data struct implementing
//! [`RemoteResource`](crate::rest::RemoteResource), plus typed accessors on
//! its [`Lazy`](crate::rest::Lazy) wrapper. The latest version is re-exported
//! here:
//!
//! ```rust,ignore
//! use mms::rest::resources::Host;        // latest version
//! use mms::rest::resources::v1_0::Host;  // explicit version
//! ```

pub mod v1_0;

// Re-export types from the latest version for convenience
pub use v1_0::*;
