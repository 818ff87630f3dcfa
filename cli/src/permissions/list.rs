//! List application permissions held by a managed identity.

use tracing::warn;

use super::catalog::RoleCatalog;
use super::report::{Abort, HeldPermission, Report};
use super::resolver::{resolve_identity, IdentitySelector};
use crate::graph::{Directory, GraphResult};

pub async fn list_permissions<D: Directory>(
    directory: &D,
    selector: &IdentitySelector,
) -> GraphResult<Report<HeldPermission>> {
    let identity = match resolve_identity(directory, selector).await?.into_result() {
        Ok(sp) => sp,
        Err(reason) => {
            warn!(identity = %selector, ?reason, "Identity did not resolve");
            return Ok(Report::Aborted(Abort::Identity {
                selector: selector.to_string(),
                reason,
            }));
        }
    };

    let mut catalog = RoleCatalog::new(directory);
    let mut held = Vec::new();
    for assignment in directory
        .list_app_role_assignments(identity.id)
        .await?
        .into_iter()
        .filter(|a| a.is_application_permission())
    {
        let (resource, permission) = catalog.describe(&assignment).await?;
        held.push(HeldPermission {
            resource,
            permission,
            assignment_id: assignment.id,
        });
    }
    held.sort_by(|a, b| (&a.resource, &a.permission).cmp(&(&b.resource, &b.permission)));

    Ok(Report::Completed {
        identity: identity.display_name,
        outcomes: held,
    })
}
