//! Directory service abstraction.

use approle_common::{AppRoleAssignment, NewAppRoleAssignment, ServicePrincipal};
use uuid::Uuid;

use super::error::GraphResult;

/// Operations the permission commands need from the directory service.
///
/// Calls are issued one at a time; implementations need not be `Sync`.
#[allow(async_fn_in_trait)]
pub trait Directory {
    /// Fetch a service principal by object ID. `Ok(None)` when it does not exist.
    async fn get_service_principal(&self, id: Uuid) -> GraphResult<Option<ServicePrincipal>>;

    /// Search service principals whose display name matches `term`.
    ///
    /// Search semantics are loose (token/prefix match), so several principals
    /// may come back for one term.
    async fn search_service_principals(&self, term: &str) -> GraphResult<Vec<ServicePrincipal>>;

    /// Service principals whose display name equals `name` exactly.
    async fn find_service_principals_by_name(&self, name: &str)
        -> GraphResult<Vec<ServicePrincipal>>;

    /// All app role assignments held by `principal_id`.
    async fn list_app_role_assignments(
        &self,
        principal_id: Uuid,
    ) -> GraphResult<Vec<AppRoleAssignment>>;

    /// Create an assignment and return it as stored by the directory.
    async fn create_app_role_assignment(
        &self,
        assignment: &NewAppRoleAssignment,
    ) -> GraphResult<AppRoleAssignment>;

    /// Delete an assignment held by `principal_id`.
    async fn delete_app_role_assignment(
        &self,
        principal_id: Uuid,
        assignment_id: &str,
    ) -> GraphResult<()>;
}
