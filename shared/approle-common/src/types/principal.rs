//! Service Principal Types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member type that marks an app role as an application permission.
pub const APPLICATION_MEMBER_TYPE: &str = "Application";

/// Application-defined permission exposed for assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRole {
    /// App role ID.
    pub id: Uuid,
    /// Permission name (e.g. `User.Read.All`).
    #[serde(default)]
    pub value: Option<String>,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Principal kinds that may hold the role ("User", "Application").
    #[serde(default)]
    pub allowed_member_types: Vec<String>,
    /// Whether the role can currently be assigned.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl AppRole {
    /// Whether the role may be assigned to service principals.
    pub fn allows_applications(&self) -> bool {
        self.allowed_member_types
            .iter()
            .any(|t| t == APPLICATION_MEMBER_TYPE)
    }

    /// Whether the role's permission name equals `name`.
    pub fn has_value(&self, name: &str) -> bool {
        self.value.as_deref() == Some(name)
    }
}

/// Directory representation of an application or identity instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipal {
    /// Object ID.
    pub id: Uuid,
    /// Display name (not guaranteed unique).
    #[serde(default)]
    pub display_name: String,
    /// Application (client) ID.
    #[serde(default)]
    pub app_id: Option<Uuid>,
    /// "Application", "ManagedIdentity", ...
    #[serde(default)]
    pub service_principal_type: Option<String>,
    /// App roles exposed by this principal.
    #[serde(default)]
    pub app_roles: Vec<AppRole>,
}

impl ServicePrincipal {
    /// Find the application permission named `name`.
    ///
    /// Only enabled roles that allow the `Application` member type match; a
    /// disabled, delegated or user-only role with the same value is ignored.
    pub fn application_role(&self, name: &str) -> Option<&AppRole> {
        self.app_roles
            .iter()
            .find(|r| r.is_enabled && r.has_value(name) && r.allows_applications())
    }

    /// Find an app role by ID.
    pub fn role_by_id(&self, id: Uuid) -> Option<&AppRole> {
        self.app_roles.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(value: &str, member_types: &[&str]) -> AppRole {
        AppRole {
            id: Uuid::new_v4(),
            value: Some(value.to_string()),
            display_name: None,
            allowed_member_types: member_types.iter().map(|s| (*s).to_string()).collect(),
            is_enabled: true,
        }
    }

    #[test]
    fn test_application_role_requires_application_member_type() {
        let sp = ServicePrincipal {
            id: Uuid::new_v4(),
            display_name: "Microsoft Graph".into(),
            app_id: None,
            service_principal_type: Some("Application".into()),
            app_roles: vec![
                role("Mail.Read", &["User"]),
                role("User.Read.All", &["Application"]),
            ],
        };

        assert!(sp.application_role("User.Read.All").is_some());
        assert!(sp.application_role("Mail.Read").is_none());
        assert!(sp.application_role("Missing").is_none());
    }

    #[test]
    fn test_disabled_role_is_not_assignable() {
        let mut retired = role("Old.Role", &["Application"]);
        retired.is_enabled = false;
        let sp = ServicePrincipal {
            id: Uuid::new_v4(),
            display_name: "billing-api".into(),
            app_id: None,
            service_principal_type: None,
            app_roles: vec![retired.clone()],
        };

        assert!(sp.application_role("Old.Role").is_none());
        assert_eq!(sp.role_by_id(retired.id), Some(&retired));
    }

    #[test]
    fn test_deserialize_graph_payload() {
        let json = r#"{
            "id": "6d4f1c3e-5d1a-4a3a-9f35-8f5f0e2c1b11",
            "displayName": "billing-api",
            "appId": "0b6c8d0e-1111-4c7a-b3a2-9a0f2c5d4e33",
            "servicePrincipalType": "Application",
            "appRoles": [{
                "id": "df021288-bdef-4463-88db-98f22de89214",
                "value": "Invoices.Read",
                "displayName": "Read invoices",
                "allowedMemberTypes": ["Application"],
                "isEnabled": true,
                "description": "ignored"
            }]
        }"#;

        let sp: ServicePrincipal = serde_json::from_str(json).unwrap();
        assert_eq!(sp.display_name, "billing-api");
        assert_eq!(sp.app_roles.len(), 1);
        assert!(sp.app_roles[0].allows_applications());
        assert!(sp.app_roles[0].has_value("Invoices.Read"));
    }

    #[test]
    fn test_missing_app_roles_defaults_to_empty() {
        let json = r#"{"id": "6d4f1c3e-5d1a-4a3a-9f35-8f5f0e2c1b11", "displayName": "mi-worker"}"#;
        let sp: ServicePrincipal = serde_json::from_str(json).unwrap();
        assert!(sp.app_roles.is_empty());
        assert!(sp.app_id.is_none());
    }
}
