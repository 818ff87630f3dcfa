//! In-memory directory for permission operation tests.

use std::cell::RefCell;

use approle_common::{
    AppRole, AppRoleAssignment, NewAppRoleAssignment, ServicePrincipal, SERVICE_PRINCIPAL_TYPE,
};
use uuid::Uuid;

use crate::graph::{Directory, GraphError, GraphResult};

#[derive(Debug, Clone, Default)]
struct State {
    principals: Vec<ServicePrincipal>,
    assignments: Vec<AppRoleAssignment>,
    next_assignment: u64,
    created: usize,
    deleted: usize,
}

/// Directory backed by vectors. Cloning snapshots the whole state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: RefCell<State>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_identity(&self, name: &str) -> ServicePrincipal {
        let sp = ServicePrincipal {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            app_id: Some(Uuid::new_v4()),
            service_principal_type: Some("ManagedIdentity".into()),
            app_roles: Vec::new(),
        };
        self.state.borrow_mut().principals.push(sp.clone());
        sp
    }

    /// Add an application exposing `(value, allowed member types)` roles.
    pub fn add_application(&self, name: &str, roles: &[(&str, &[&str])]) -> ServicePrincipal {
        let sp = ServicePrincipal {
            id: Uuid::new_v4(),
            display_name: name.to_string(),
            app_id: Some(Uuid::new_v4()),
            service_principal_type: Some("Application".into()),
            app_roles: roles
                .iter()
                .map(|(value, types)| AppRole {
                    id: Uuid::new_v4(),
                    value: Some((*value).to_string()),
                    display_name: None,
                    allowed_member_types: types.iter().map(|t| (*t).to_string()).collect(),
                    is_enabled: true,
                })
                .collect(),
        };
        self.state.borrow_mut().principals.push(sp.clone());
        sp
    }

    /// Add a principal built by the caller, e.g. one with disabled roles.
    pub fn add_principal(&self, sp: ServicePrincipal) -> ServicePrincipal {
        self.state.borrow_mut().principals.push(sp.clone());
        sp
    }

    /// Seed an existing application permission without counting it as a mutation.
    pub fn add_assignment(
        &self,
        principal: &ServicePrincipal,
        resource: &ServicePrincipal,
        role_value: &str,
    ) -> AppRoleAssignment {
        let role = resource
            .app_roles
            .iter()
            .find(|r| r.has_value(role_value))
            .expect("role must exist on resource");
        let mut state = self.state.borrow_mut();
        let assignment = new_assignment(
            &mut state,
            principal.id,
            resource,
            role.id,
            Some(SERVICE_PRINCIPAL_TYPE),
        );
        state.assignments.push(assignment.clone());
        assignment
    }

    /// Seed an arbitrary assignment (e.g. default access or non-SP principal type).
    pub fn add_raw_assignment(
        &self,
        principal: &ServicePrincipal,
        resource: &ServicePrincipal,
        app_role_id: Uuid,
        principal_type: Option<&str>,
    ) -> AppRoleAssignment {
        let mut state = self.state.borrow_mut();
        let assignment =
            new_assignment(&mut state, principal.id, resource, app_role_id, principal_type);
        state.assignments.push(assignment.clone());
        assignment
    }

    pub fn assignments_for(&self, principal_id: Uuid) -> Vec<AppRoleAssignment> {
        self.state
            .borrow()
            .assignments
            .iter()
            .filter(|a| a.principal_id == principal_id)
            .cloned()
            .collect()
    }

    /// Number of (creates, deletes) performed through the [`Directory`] trait.
    pub fn mutations(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.created, state.deleted)
    }
}

fn new_assignment(
    state: &mut State,
    principal_id: Uuid,
    resource: &ServicePrincipal,
    app_role_id: Uuid,
    principal_type: Option<&str>,
) -> AppRoleAssignment {
    state.next_assignment += 1;
    AppRoleAssignment {
        id: format!("assignment-{}", state.next_assignment),
        app_role_id,
        principal_id,
        principal_type: principal_type.map(str::to_string),
        principal_display_name: None,
        resource_id: resource.id,
        resource_display_name: Some(resource.display_name.clone()),
        created_date_time: None,
    }
}

fn api_error(status: u16, code: &str) -> GraphError {
    GraphError::Api {
        status,
        code: code.to_string(),
        message: code.to_string(),
    }
}

impl Directory for InMemoryDirectory {
    async fn get_service_principal(&self, id: Uuid) -> GraphResult<Option<ServicePrincipal>> {
        Ok(self
            .state
            .borrow()
            .principals
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn search_service_principals(&self, term: &str) -> GraphResult<Vec<ServicePrincipal>> {
        let term = term.to_lowercase();
        Ok(self
            .state
            .borrow()
            .principals
            .iter()
            .filter(|p| p.display_name.to_lowercase().starts_with(&term))
            .cloned()
            .collect())
    }

    async fn find_service_principals_by_name(
        &self,
        name: &str,
    ) -> GraphResult<Vec<ServicePrincipal>> {
        Ok(self
            .state
            .borrow()
            .principals
            .iter()
            .filter(|p| p.display_name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }

    async fn list_app_role_assignments(
        &self,
        principal_id: Uuid,
    ) -> GraphResult<Vec<AppRoleAssignment>> {
        Ok(self.assignments_for(principal_id))
    }

    async fn create_app_role_assignment(
        &self,
        request: &NewAppRoleAssignment,
    ) -> GraphResult<AppRoleAssignment> {
        let mut state = self.state.borrow_mut();
        let resource = state
            .principals
            .iter()
            .find(|p| p.id == request.resource_id)
            .cloned()
            .ok_or_else(|| api_error(404, "Request_ResourceNotFound"))?;
        if resource.role_by_id(request.app_role_id).is_none() {
            return Err(api_error(400, "Request_BadRequest"));
        }
        let duplicate = state.assignments.iter().any(|a| {
            a.principal_id == request.principal_id
                && a.resource_id == request.resource_id
                && a.app_role_id == request.app_role_id
        });
        if duplicate {
            return Err(api_error(400, "Permission_Duplicate"));
        }

        let assignment = new_assignment(
            &mut state,
            request.principal_id,
            &resource,
            request.app_role_id,
            Some(SERVICE_PRINCIPAL_TYPE),
        );
        state.assignments.push(assignment.clone());
        state.created += 1;
        Ok(assignment)
    }

    async fn delete_app_role_assignment(
        &self,
        principal_id: Uuid,
        assignment_id: &str,
    ) -> GraphResult<()> {
        let mut state = self.state.borrow_mut();
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.principal_id == principal_id && a.id == assignment_id));
        if state.assignments.len() == before {
            return Err(api_error(404, "Request_ResourceNotFound"));
        }
        state.deleted += 1;
        Ok(())
    }
}
