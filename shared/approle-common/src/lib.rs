//! Approle Common Library
//!
//! Wire types for the directory entities (service principals, app roles and
//! app role assignments) exchanged with Microsoft Graph.

pub mod types;

pub use types::*;
