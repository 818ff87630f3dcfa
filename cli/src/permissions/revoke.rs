//! Revoke application permissions from a managed identity.

use approle_common::AppRoleAssignment;
use tracing::{info, warn};

use super::catalog::{requested_names, RoleCatalog};
use super::report::{Abort, Report, RevokeOutcome};
use super::resolver::{resolve_application, resolve_identity, IdentitySelector};
use crate::graph::{Directory, GraphResult};

/// Which assignments to remove.
#[derive(Debug, Clone)]
pub enum RevokeScope {
    /// Every application permission the identity holds, on any resource.
    All,
    /// Named permissions on one application.
    Named {
        application: String,
        permissions: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct RevokeRequest {
    pub identity: IdentitySelector,
    pub scope: RevokeScope,
    /// Report what would change without deleting assignments.
    pub dry_run: bool,
}

/// Remove application permissions held by a managed identity.
///
/// Only application-type assignments are considered; default access grants
/// and assignments of other principal types are never touched.
pub async fn revoke<D: Directory>(
    directory: &D,
    request: &RevokeRequest,
) -> GraphResult<Report<RevokeOutcome>> {
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

    let outcomes = match &request.scope {
        RevokeScope::All => revoke_all(directory, identity.id, request.dry_run).await?,
        RevokeScope::Named {
            application,
            permissions,
        } => {
            let names = requested_names(permissions);
            if names.is_empty() {
                info!(identity = %identity.display_name, "No permissions requested for removal");
                return Ok(Report::Aborted(Abort::NothingRequested));
            }

            let resource = match resolve_application(directory, application)
                .await?
                .into_result()
            {
                Ok(sp) => sp,
                Err(reason) => {
                    warn!(app = %application, ?reason, "Application did not resolve");
                    return Ok(Report::Aborted(Abort::Application {
                        name: application.clone(),
                        reason,
                    }));
                }
            };

            let existing: Vec<AppRoleAssignment> = directory
                .list_app_role_assignments(identity.id)
                .await?
                .into_iter()
                .filter(|a| a.is_application_permission() && a.resource_id == resource.id)
                .collect();

            let mut outcomes = Vec::new();
            for name in names {
                let matching: Vec<&AppRoleAssignment> = existing
                    .iter()
                    .filter(|a| {
                        resource
                            .role_by_id(a.app_role_id)
                            .is_some_and(|role| role.has_value(name))
                    })
                    .collect();

                if matching.is_empty() {
                    outcomes.push(RevokeOutcome::NotAssigned {
                        permission: name.to_string(),
                    });
                    continue;
                }

                for assignment in matching {
                    outcomes.push(
                        remove(
                            directory,
                            assignment,
                            resource.display_name.clone(),
                            name.to_string(),
                            request.dry_run,
                        )
                        .await?,
                    );
                }
            }
            outcomes
        }
    };

    Ok(Report::Completed {
        identity: identity.display_name,
        outcomes,
    })
}

async fn revoke_all<D: Directory>(
    directory: &D,
    principal_id: uuid::Uuid,
    dry_run: bool,
) -> GraphResult<Vec<RevokeOutcome>> {
    let existing: Vec<AppRoleAssignment> = directory
        .list_app_role_assignments(principal_id)
        .await?
        .into_iter()
        .filter(AppRoleAssignment::is_application_permission)
        .collect();

    let mut catalog = RoleCatalog::new(directory);
    let mut outcomes = Vec::with_capacity(existing.len());
    for assignment in &existing {
        let (resource, permission) = catalog.describe(assignment).await?;
        outcomes.push(remove(directory, assignment, resource, permission, dry_run).await?);
    }
    Ok(outcomes)
}

async fn remove<D: Directory>(
    directory: &D,
    assignment: &AppRoleAssignment,
    resource: String,
    permission: String,
    dry_run: bool,
) -> GraphResult<RevokeOutcome> {
    if dry_run {
        return Ok(RevokeOutcome::WouldRevoke {
            resource,
            permission,
        });
    }

    directory
        .delete_app_role_assignment(assignment.principal_id, &assignment.id)
        .await?;
    info!(
        principal_id = %assignment.principal_id,
        resource = %resource,
        permission = %permission,
        assignment_id = %assignment.id,
        "Revoked application permission"
    );

    Ok(RevokeOutcome::Revoked {
        resource,
        permission,
        assignment_id: assignment.id.clone(),
    })
}
