//! Microsoft Graph HTTP Client
//!
//! Implements [`Directory`] over the Graph v1.0 REST API.

use approle_common::{
    AppRoleAssignment, GraphErrorBody, NewAppRoleAssignment, ODataPage, ServicePrincipal,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::directory::Directory;
use super::error::{GraphError, GraphResult};
use super::token;
use crate::config::Config;

/// Header Graph requires for `$search` queries.
const CONSISTENCY_LEVEL: (&str, &str) = ("ConsistencyLevel", "eventual");

/// Graph client with a resolved bearer token.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GraphClient {
    /// Acquire a token and build a client from configuration.
    pub async fn connect(config: &Config) -> GraphResult<Self> {
        let token = token::acquire_token(config).await?;
        Self::with_token(config, token)
    }

    /// Build a client around an existing token.
    pub fn with_token(config: &Config, token: String) -> GraphResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("approle/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.graph_base_url.clone(),
            token,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, url, "Graph request");
        self.http.request(method, url).bearer_auth(&self.token)
    }

    /// Send a request and map non-success statuses to [`GraphError::Api`].
    async fn send(&self, request: RequestBuilder) -> GraphResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<GraphErrorBody>(&body) {
            Ok(parsed) => (parsed.error.code, parsed.error.message),
            Err(_) => (
                status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            ),
        };

        Err(GraphError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GraphResult<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch every page of a collection, following `@odata.nextLink`.
    ///
    /// `eventual` adds the `ConsistencyLevel` header to every page request;
    /// only advanced queries such as `$search` need it.
    async fn collect<T: DeserializeOwned>(
        &self,
        first: RequestBuilder,
        eventual: bool,
    ) -> GraphResult<Vec<T>> {
        let with_consistency = |request: RequestBuilder| {
            if eventual {
                request.header(CONSISTENCY_LEVEL.0, CONSISTENCY_LEVEL.1)
            } else {
                request
            }
        };

        let mut items = Vec::new();
        let first = with_consistency(first);
        let mut page: ODataPage<T> = Self::decode(self.send(first).await?).await?;

        loop {
            items.extend(page.value);
            let Some(next) = page.next_link else {
                break;
            };
            // nextLink is absolute and already carries the original query.
            let request = with_consistency(self.request(Method::GET, &next));
            page = Self::decode(self.send(request).await?).await?;
        }

        Ok(items)
    }

    fn principals_url(&self) -> String {
        format!("{}/servicePrincipals", self.base_url)
    }

    fn assignments_url(&self, principal_id: Uuid) -> String {
        format!("{}/servicePrincipals/{principal_id}/appRoleAssignments", self.base_url)
    }
}

/// Quote a value for an OData string literal.
pub fn odata_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Build a `$search` clause on display name.
pub fn display_name_search(term: &str) -> String {
    format!("\"displayName:{}\"", term.replace('"', "\\\""))
}

impl Directory for GraphClient {
    async fn get_service_principal(&self, id: Uuid) -> GraphResult<Option<ServicePrincipal>> {
        let url = format!("{}/{id}", self.principals_url());
        match self.send(self.request(Method::GET, &url)).await {
            Ok(response) => Self::decode(response).await.map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn search_service_principals(&self, term: &str) -> GraphResult<Vec<ServicePrincipal>> {
        let request = self
            .request(Method::GET, &self.principals_url())
            .query(&[("$search", display_name_search(term))]);
        self.collect(request, true).await
    }

    async fn find_service_principals_by_name(
        &self,
        name: &str,
    ) -> GraphResult<Vec<ServicePrincipal>> {
        let filter = format!("displayName eq {}", odata_quote(name));
        let request = self
            .request(Method::GET, &self.principals_url())
            .query(&[("$filter", filter)]);
        self.collect(request, false).await
    }

    async fn list_app_role_assignments(
        &self,
        principal_id: Uuid,
    ) -> GraphResult<Vec<AppRoleAssignment>> {
        let request = self.request(Method::GET, &self.assignments_url(principal_id));
        self.collect(request, false).await
    }

    async fn create_app_role_assignment(
        &self,
        assignment: &NewAppRoleAssignment,
    ) -> GraphResult<AppRoleAssignment> {
        let request = self
            .request(Method::POST, &self.assignments_url(assignment.principal_id))
            .json(assignment);
        Self::decode(self.send(request).await?).await
    }

    async fn delete_app_role_assignment(
        &self,
        principal_id: Uuid,
        assignment_id: &str,
    ) -> GraphResult<()> {
        let url = format!("{}/{assignment_id}", self.assignments_url(principal_id));
        self.send(self.request(Method::DELETE, &url)).await?;
        Ok(())
    }
}
