//! Directory access.
//!
//! The [`Directory`] trait is the seam between the permission operations and
//! Microsoft Graph; [`GraphClient`] is the HTTP implementation.

pub mod client;
pub mod directory;
pub mod error;
pub mod token;

pub use client::GraphClient;
pub use directory::Directory;
pub use error::{GraphError, GraphResult};
