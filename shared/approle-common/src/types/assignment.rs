//! App Role Assignment Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Principal type reported for assignments held by service principals.
pub const SERVICE_PRINCIPAL_TYPE: &str = "ServicePrincipal";

/// A grant linking a principal to a resource's app role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRoleAssignment {
    /// Assignment ID (opaque, not a UUID).
    pub id: String,
    /// Granted app role. The nil UUID is the default access role.
    pub app_role_id: Uuid,
    /// Principal holding the grant.
    pub principal_id: Uuid,
    /// "User", "Group" or "ServicePrincipal".
    #[serde(default)]
    pub principal_type: Option<String>,
    #[serde(default)]
    pub principal_display_name: Option<String>,
    /// Service principal exposing the role.
    pub resource_id: Uuid,
    #[serde(default)]
    pub resource_display_name: Option<String>,
    #[serde(default)]
    pub created_date_time: Option<DateTime<Utc>>,
}

impl AppRoleAssignment {
    /// Whether this assignment is an application permission.
    ///
    /// Default access assignments (nil role ID) and grants held by users or
    /// groups are excluded.
    pub fn is_application_permission(&self) -> bool {
        self.principal_type.as_deref() == Some(SERVICE_PRINCIPAL_TYPE) && !self.app_role_id.is_nil()
    }

    /// Resource label for display.
    ///
    /// Prefers the name carried on the assignment, then `resource_name`
    /// (looked up separately), then the resource ID.
    pub fn resource_label(&self, resource_name: Option<&str>) -> String {
        self.resource_display_name
            .as_deref()
            .or(resource_name)
            .map_or_else(|| self.resource_id.to_string(), str::to_string)
    }
}

/// Request body for creating an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppRoleAssignment {
    pub principal_id: Uuid,
    pub resource_id: Uuid,
    pub app_role_id: Uuid,
}
