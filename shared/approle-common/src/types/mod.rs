//! Directory Types

pub mod assignment;
pub mod odata;
pub mod principal;

pub use assignment::{AppRoleAssignment, NewAppRoleAssignment, SERVICE_PRINCIPAL_TYPE};
pub use odata::{GraphErrorBody, GraphErrorDetail, ODataPage};
pub use principal::{AppRole, ServicePrincipal, APPLICATION_MEMBER_TYPE};
