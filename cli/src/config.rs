//! Tool Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

/// Default Microsoft Graph endpoint.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default Azure AD authority host.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Where the bearer token for Graph requests comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Pre-acquired access token (e.g. `az account get-access-token`).
    Static(String),
    /// OAuth2 client-credentials grant against the tenant.
    ClientCredentials {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
}

/// Tool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Graph API base URL, without trailing slash
    pub graph_base_url: String,

    /// Authority host used for OIDC discovery
    pub authority_host: String,

    /// Token source for Graph requests
    pub token_source: TokenSource,

    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GRAPH_ACCESS_TOKEN` takes precedence over client credentials.
    pub fn from_env() -> Result<Self> {
        let token_source = if let Ok(token) = env::var("GRAPH_ACCESS_TOKEN") {
            if token.trim().is_empty() {
                bail!("GRAPH_ACCESS_TOKEN is set but empty");
            }
            TokenSource::Static(token.trim().to_string())
        } else {
            TokenSource::ClientCredentials {
                tenant_id: env::var("AZURE_TENANT_ID")
                    .context("AZURE_TENANT_ID must be set (or provide GRAPH_ACCESS_TOKEN)")?,
                client_id: env::var("AZURE_CLIENT_ID")
                    .context("AZURE_CLIENT_ID must be set (or provide GRAPH_ACCESS_TOKEN)")?,
                client_secret: env::var("AZURE_CLIENT_SECRET")
                    .context("AZURE_CLIENT_SECRET must be set (or provide GRAPH_ACCESS_TOKEN)")?,
            }
        };

        Ok(Self {
            graph_base_url: env::var("GRAPH_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GRAPH_BASE_URL.into()),
            authority_host: env::var("AZURE_AUTHORITY_HOST")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_AUTHORITY_HOST.into()),
            token_source,
            request_timeout: Duration::from_secs(
                env::var("GRAPH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
        })
    }

    /// Issuer URL for the configured tenant, if using client credentials.
    pub fn issuer_url(&self) -> Option<String> {
        match &self.token_source {
            TokenSource::ClientCredentials { tenant_id, .. } => {
                Some(format!("{}/{tenant_id}/v2.0", self.authority_host))
            }
            TokenSource::Static(_) => None,
        }
    }

    /// Create a configuration pointing at a local mock server.
    #[must_use]
    pub fn for_base_url(base_url: &str, token: &str) -> Self {
        Self {
            graph_base_url: base_url.trim_end_matches('/').to_string(),
            authority_host: DEFAULT_AUTHORITY_HOST.into(),
            token_source: TokenSource::Static(token.into()),
            request_timeout: Duration::from_secs(5),
        }
    }
}
