//! Grant application permissions to a managed identity.

use std::collections::HashSet;

use approle_common::NewAppRoleAssignment;
use tracing::{info, warn};
use uuid::Uuid;

use super::catalog::requested_names;
use super::report::{Abort, GrantOutcome, Report};
use super::resolver::{resolve_application, resolve_identity, IdentitySelector};
use crate::graph::{Directory, GraphResult};

/// Permissions to grant on one application.
#[derive(Debug, Clone)]
pub struct GrantRequest {
    pub identity: IdentitySelector,
    /// Display name of the application exposing the roles.
    pub application: String,
    pub permissions: Vec<String>,
    /// Report what would change without creating assignments.
    pub dry_run: bool,
}

/// Grant each requested permission that the identity does not already hold.
///
/// Already-granted and unknown permissions are reported per item; the loop
/// continues past them. Directory errors stop the pass.
pub async fn grant<D: Directory>(
    directory: &D,
    request: &GrantRequest,
) -> GraphResult<Report<GrantOutcome>> {
    let identity = match resolve_identity(directory, &request.identity)
        .await?
        .into_result()
    {
        Ok(sp) => sp,
        Err(reason) => {
            warn!(identity = %request.identity, ?reason, "Identity did not resolve");
            return Ok(Report::Aborted(Abort::Identity {
                selector: request.identity.to_string(),
                reason,
            }));
        }
    };

    let application = match resolve_application(directory, &request.application)
        .await?
        .into_result()
    {
        Ok(sp) => sp,
        Err(reason) => {
            warn!(app = %request.application, ?reason, "Application did not resolve");
            return Ok(Report::Aborted(Abort::Application {
                name: request.application.clone(),
                reason,
            }));
        }
    };

    // Roles already held on this application.
    let mut held: HashSet<Uuid> = directory
        .list_app_role_assignments(identity.id)
        .await?
        .into_iter()
        .filter(|a| a.is_application_permission() && a.resource_id == application.id)
        .map(|a| a.app_role_id)
        .collect();

    let mut outcomes = Vec::new();
    for name in requested_names(&request.permissions) {
        let permission = name.to_string();

        let already = application
            .app_roles
            .iter()
            .any(|r| r.has_value(name) && held.contains(&r.id));
        if already {
            info!(identity = %identity.display_name, permission = name, "Already granted");
            outcomes.push(GrantOutcome::AlreadyGranted { permission });
            continue;
        }

        let Some(role) = application.application_role(name) else {
            warn!(app = %application.display_name, permission = name, "No matching application role");
            outcomes.push(GrantOutcome::RoleNotFound { permission });
            continue;
        };

        if request.dry_run {
            outcomes.push(GrantOutcome::WouldGrant { permission });
            held.insert(role.id);
            continue;
        }

        let created = directory
            .create_app_role_assignment(&NewAppRoleAssignment {
                principal_id: identity.id,
                resource_id: application.id,
                app_role_id: role.id,
            })
            .await?;
        info!(
            identity = %identity.display_name,
            app = %application.display_name,
            permission = name,
            assignment_id = %created.id,
            "Granted application permission"
        );
        held.insert(role.id);
        outcomes.push(GrantOutcome::Granted {
            permission,
            assignment_id: created.id,
        });
    }

    Ok(Report::Completed {
        identity: identity.display_name,
        outcomes,
    })
}
