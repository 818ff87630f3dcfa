//! Access token acquisition.
//!
//! Uses OIDC discovery against the tenant's v2.0 issuer, then the OAuth2
//! client-credentials grant for the Graph `.default` scope.

use openidconnect::core::{CoreClient, CoreProviderMetadata};
use openidconnect::reqwest::async_http_client;
use openidconnect::{AuthType, ClientId, ClientSecret, IssuerUrl, OAuth2TokenResponse, Scope};
use tracing::{debug, info};

use super::error::{GraphError, GraphResult};
use crate::config::{Config, TokenSource};

/// Scope requesting every application permission granted to the caller.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Acquire a bearer token for Graph requests.
pub async fn acquire_token(config: &Config) -> GraphResult<String> {
    match &config.token_source {
        TokenSource::Static(token) => {
            debug!("Using pre-acquired Graph access token");
            Ok(token.clone())
        }
        TokenSource::ClientCredentials {
            client_id,
            client_secret,
            ..
        } => {
            let issuer_url = config
                .issuer_url()
                .ok_or_else(|| GraphError::Token("No issuer configured".into()))?;
            let client = build_client(&issuer_url, client_id, client_secret).await?;

            let response = client
                .exchange_client_credentials()
                .add_scope(Scope::new(GRAPH_DEFAULT_SCOPE.to_string()))
                .request_async(async_http_client)
                .await
                .map_err(|e| GraphError::Token(format!("client credentials exchange failed: {e}")))?;

            info!(issuer = %issuer_url, client_id = %client_id, "Acquired Graph access token");
            Ok(response.access_token().secret().clone())
        }
    }
}

/// Build an openidconnect `CoreClient` via OIDC discovery.
async fn build_client(
    issuer_url: &str,
    client_id: &str,
    client_secret: &str,
) -> GraphResult<CoreClient> {
    let issuer =
        IssuerUrl::new(issuer_url.to_string()).map_err(|e| GraphError::InvalidUrl(e.to_string()))?;
    let metadata = CoreProviderMetadata::discover_async(issuer, async_http_client)
        .await
        .map_err(|e| GraphError::Token(format!("OIDC discovery failed: {e}")))?;

    // Azure AD accepts the secret in the form body for confidential clients.
    let client = CoreClient::from_provider_metadata(
        metadata,
        ClientId::new(client_id.to_string()),
        Some(ClientSecret::new(client_secret.to_string())),
    )
    .set_auth_type(AuthType::RequestBody);

    Ok(client)
}
