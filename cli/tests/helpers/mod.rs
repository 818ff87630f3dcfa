//! Graph payload fixtures for HTTP integration tests.
#![allow(dead_code)]

use approle_cli::config::Config;
use approle_cli::graph::GraphClient;
use serde_json::{json, Value};
use uuid::Uuid;

/// Bearer token every mock expects.
pub const TEST_TOKEN: &str = "test-token";

/// Build a client pointed at a mock server.
pub fn client_for(server: &mockito::ServerGuard) -> GraphClient {
    let config = Config::for_base_url(&server.url(), TEST_TOKEN);
    GraphClient::with_token(&config, TEST_TOKEN.into()).expect("client should build")
}

/// A service principal payload with `(role id, value, member types)` roles.
pub fn service_principal(id: Uuid, name: &str, roles: &[(Uuid, &str, &[&str])]) -> Value {
    json!({
        "id": id,
        "displayName": name,
        "appId": Uuid::new_v4(),
        "servicePrincipalType": "Application",
        "appRoles": roles.iter().map(|(role_id, value, types)| json!({
            "id": role_id,
            "value": value,
            "displayName": value,
            "allowedMemberTypes": types,
            "isEnabled": true,
        })).collect::<Vec<_>>(),
    })
}

pub fn assignment(id: &str, principal_id: Uuid, resource: (Uuid, &str), app_role_id: Uuid) -> Value {
    json!({
        "id": id,
        "appRoleId": app_role_id,
        "principalId": principal_id,
        "principalType": "ServicePrincipal",
        "principalDisplayName": "mi-orders",
        "resourceId": resource.0,
        "resourceDisplayName": resource.1,
        "createdDateTime": "2024-03-01T10:00:00Z",
    })
}

/// OData collection page.
pub fn page(values: Vec<Value>) -> String {
    json!({ "value": values }).to_string()
}

/// OData collection page with a continuation link.
pub fn page_with_next(values: Vec<Value>, next_link: &str) -> String {
    json!({ "value": values, "@odata.nextLink": next_link }).to_string()
}
