//! App role assignment operations.
//!
//! - `grant`: add application permissions to a managed identity
//! - `revoke`: remove all, or named, application permissions
//! - `list`: show the application permissions an identity holds

pub mod catalog;
pub mod grant;
pub mod list;
pub mod report;
pub mod resolver;
pub mod revoke;

#[cfg(test)]
pub(crate) mod testing;

pub use grant::{grant, GrantRequest};
pub use list::list_permissions;
pub use report::{Abort, GrantOutcome, HeldPermission, Report, RevokeOutcome, StatusLine};
pub use resolver::{
    resolve_application, resolve_identity, IdentitySelector, Resolution, Unresolved,
};
pub use revoke::{revoke, RevokeRequest, RevokeScope};
