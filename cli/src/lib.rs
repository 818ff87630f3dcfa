//! Approle
//!
//! Grants and revokes application permissions (app role assignments) for
//! Azure AD managed identities through Microsoft Graph.

pub mod cli;
pub mod config;
pub mod graph;
pub mod logging;
pub mod permissions;
