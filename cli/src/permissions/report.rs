//! Operation reports.
//!
//! Every grant, revoke or list pass returns a [`Report`]: either an early
//! abort (unresolved names, nothing requested) or one outcome per item.
//! The `Display` impls are the status lines printed by the CLI.

use std::fmt;

use super::resolver::Unresolved;

/// An item that can be printed as a status line.
pub trait StatusLine: fmt::Display {
    /// Whether the line is prefixed with the identity's display name.
    const NAMES_IDENTITY: bool = true;
}

/// Reason a pass stopped before touching any assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    /// The managed identity did not resolve to exactly one principal.
    Identity { selector: String, reason: Unresolved },
    /// The target application did not resolve to exactly one principal.
    Application { name: String, reason: Unresolved },
    /// Named removal was requested with no permission names.
    NothingRequested,
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity {
                selector,
                reason: Unresolved::NotFound,
            } => write!(f, "No managed identity found for '{selector}'"),
            Self::Identity {
                selector,
                reason: Unresolved::Ambiguous(n),
            } => write!(
                f,
                "'{selector}' matches {n} service principals; use the object ID instead"
            ),
            Self::Application {
                name,
                reason: Unresolved::NotFound,
            } => write!(f, "No application service principal named '{name}'"),
            Self::Application {
                name,
                reason: Unresolved::Ambiguous(n),
            } => write!(f, "Application name '{name}' matches {n} service principals"),
            Self::NothingRequested => write!(f, "No permissions specified, nothing to revoke"),
        }
    }
}

/// Result of one grant item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted {
        permission: String,
        assignment_id: String,
    },
    WouldGrant {
        permission: String,
    },
    AlreadyGranted {
        permission: String,
    },
    /// No app role with this value allows the `Application` member type.
    RoleNotFound {
        permission: String,
    },
}

impl StatusLine for GrantOutcome {}

impl fmt::Display for GrantOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted {
                permission,
                assignment_id,
            } => write!(f, "Granted '{permission}' (assignment {assignment_id})"),
            Self::WouldGrant { permission } => write!(f, "Would grant '{permission}'"),
            Self::AlreadyGranted { permission } => {
                write!(f, "Permission '{permission}' is already granted")
            }
            Self::RoleNotFound { permission } => write!(
                f,
                "Permission '{permission}' is not an application role of the target application"
            ),
        }
    }
}

/// Result of one revoke item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked {
        resource: String,
        permission: String,
        assignment_id: String,
    },
    WouldRevoke {
        resource: String,
        permission: String,
    },
    NotAssigned {
        permission: String,
    },
}

impl StatusLine for RevokeOutcome {}

impl fmt::Display for RevokeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Revoked {
                resource,
                permission,
                assignment_id,
            } => write!(
                f,
                "Revoked '{permission}' on {resource} (assignment {assignment_id})"
            ),
            Self::WouldRevoke {
                resource,
                permission,
            } => write!(f, "Would revoke '{permission}' on {resource}"),
            Self::NotAssigned { permission } => {
                write!(f, "Permission '{permission}' is not assigned")
            }
        }
    }
}

/// An application permission currently held by an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldPermission {
    pub resource: String,
    pub permission: String,
    pub assignment_id: String,
}

/// Listed as `<resource>: <permission>`; the identity is implied.
impl StatusLine for HeldPermission {
    const NAMES_IDENTITY: bool = false;
}

impl fmt::Display for HeldPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource, self.permission)
    }
}

/// Outcome of a full pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report<T> {
    Aborted(Abort),
    Completed {
        /// Display name of the resolved identity.
        identity: String,
        outcomes: Vec<T>,
    },
}

impl<T: StatusLine> Report<T> {
    pub fn outcomes(&self) -> &[T] {
        match self {
            Self::Aborted(_) => &[],
            Self::Completed { outcomes, .. } => outcomes,
        }
    }

    /// Status lines for console output.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Aborted(abort) => vec![abort.to_string()],
            Self::Completed { identity, outcomes } if outcomes.is_empty() => {
                vec![format!("{identity}: nothing to do")]
            }
            Self::Completed { outcomes, .. } if !T::NAMES_IDENTITY => {
                outcomes.iter().map(ToString::to_string).collect()
            }
            Self::Completed { identity, outcomes } => outcomes
                .iter()
                .map(|o| format!("{identity}: {o}"))
                .collect(),
        }
    }
}
