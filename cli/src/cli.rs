//! Command-line surface.

use clap::{Parser, Subcommand};

use crate::graph::{Directory, GraphResult};
use crate::permissions::{
    grant, list_permissions, revoke, GrantRequest, IdentitySelector, RevokeRequest, RevokeScope,
};

/// Grant and revoke application permissions for Azure AD managed identities.
#[derive(Debug, Parser)]
#[command(name = "approle", version, about)]
pub struct Cli {
    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Report changes without creating or deleting assignments
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grant application permissions to a managed identity
    Grant {
        /// Object ID or unique display name of the managed identity
        #[arg(long, short)]
        identity: IdentitySelector,

        /// Display name of the application exposing the permissions
        #[arg(long, short)]
        app: String,

        /// Permission (app role value); repeat or comma-separate
        #[arg(long = "permission", short, required = true, value_delimiter = ',')]
        permissions: Vec<String>,
    },

    /// Revoke application permissions from a managed identity
    Revoke {
        /// Object ID or unique display name of the managed identity
        #[arg(long, short)]
        identity: IdentitySelector,

        /// Remove every application permission the identity holds
        #[arg(long, conflicts_with_all = ["app", "permissions"])]
        all: bool,

        /// Display name of the application exposing the permissions
        #[arg(long, short, required_unless_present = "all")]
        app: Option<String>,

        /// Permission (app role value); repeat or comma-separate
        #[arg(long = "permission", short, value_delimiter = ',')]
        permissions: Vec<String>,
    },

    /// List application permissions held by a managed identity
    List {
        /// Object ID or unique display name of the managed identity
        #[arg(long, short)]
        identity: IdentitySelector,
    },
}

impl Command {
    /// Run the command against a directory and return status lines.
    pub async fn execute<D: Directory>(self, directory: &D, dry_run: bool) -> GraphResult<Vec<String>> {
        match self {
            Self::Grant {
                identity,
                app,
                permissions,
            } => {
                let request = GrantRequest {
                    identity,
                    application: app,
                    permissions,
                    dry_run,
                };
                Ok(grant(directory, &request).await?.lines())
            }
            Self::Revoke {
                identity,
                all,
                app,
                permissions,
            } => {
                let scope = match (all, app) {
                    (false, Some(application)) => RevokeScope::Named {
                        application,
                        permissions,
                    },
                    _ => RevokeScope::All,
                };
                let request = RevokeRequest {
                    identity,
                    scope,
                    dry_run,
                };
                Ok(revoke(directory, &request).await?.lines())
            }
            Self::List { identity } => Ok(list_permissions(directory, &identity).await?.lines()),
        }
    }
}
