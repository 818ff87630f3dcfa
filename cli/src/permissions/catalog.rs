//! Role name lookup for existing assignments.

use std::collections::HashMap;

use approle_common::{AppRoleAssignment, ServicePrincipal};
use uuid::Uuid;

use crate::graph::{Directory, GraphResult};

/// Caches resource service principals so each is fetched at most once per pass.
pub struct RoleCatalog<'a, D> {
    directory: &'a D,
    resources: HashMap<Uuid, Option<ServicePrincipal>>,
}

impl<'a, D: Directory> RoleCatalog<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            resources: HashMap::new(),
        }
    }

    /// Resource label and permission name for an assignment.
    ///
    /// Falls back to the raw IDs when the resource or role no longer exists.
    pub async fn describe(&mut self, assignment: &AppRoleAssignment) -> GraphResult<(String, String)> {
        if !self.resources.contains_key(&assignment.resource_id) {
            let resource = self
                .directory
                .get_service_principal(assignment.resource_id)
                .await?;
            self.resources.insert(assignment.resource_id, resource);
        }

        let resource = self.resources.get(&assignment.resource_id).and_then(Option::as_ref);
        let label = assignment.resource_label(resource.map(|r| r.display_name.as_str()));
        let permission = resource
            .and_then(|r| r.role_by_id(assignment.app_role_id))
            .and_then(|role| role.value.clone())
            .unwrap_or_else(|| assignment.app_role_id.to_string());

        Ok((label, permission))
    }
}

/// Requested permission names, trimmed and deduplicated in first-seen order.
pub fn requested_names(permissions: &[String]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::with_capacity(permissions.len());
    for name in permissions.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
