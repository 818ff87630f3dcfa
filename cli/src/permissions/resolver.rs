//! Principal resolution.
//!
//! Resolves identity selectors and application names to exactly one service
//! principal. Zero or several matches are reported to the caller as a tagged
//! outcome rather than an error.

use std::fmt;
use std::str::FromStr;

use approle_common::ServicePrincipal;
use uuid::Uuid;

use crate::graph::{Directory, GraphResult};

/// How a managed identity is named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySelector {
    /// Service principal object ID.
    ObjectId(Uuid),
    /// Display name; must match exactly one principal.
    DisplayName(String),
}

impl FromStr for IdentitySelector {
    type Err = std::convert::Infallible;

    /// Anything that parses as a UUID is an object ID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(Uuid::parse_str(s).map_or_else(|_| Self::DisplayName(s.to_string()), Self::ObjectId))
    }
}

impl fmt::Display for IdentitySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ObjectId(id) => write!(f, "{id}"),
            Self::DisplayName(name) => write!(f, "{name}"),
        }
    }
}

/// Why a lookup did not produce exactly one principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    NotFound,
    /// Number of principals that matched.
    Ambiguous(usize),
}

/// Outcome of a lookup that must match exactly one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    NotFound,
    Ambiguous(usize),
    Found(T),
}

impl<T> Resolution<T> {
    /// Classify a list of matches.
    pub fn from_matches(mut matches: Vec<T>) -> Self {
        match matches.len() {
            0 => Self::NotFound,
            1 => matches.pop().map_or(Self::NotFound, Self::Found),
            n => Self::Ambiguous(n),
        }
    }

    pub fn into_result(self) -> Result<T, Unresolved> {
        match self {
            Self::Found(value) => Ok(value),
            Self::NotFound => Err(Unresolved::NotFound),
            Self::Ambiguous(n) => Err(Unresolved::Ambiguous(n)),
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

/// Resolve a managed identity by object ID or unique display name.
///
/// A name is looked up with a display-name search. When the search returns
/// several principals, only those whose display name equals `name`
/// (ignoring case) are kept, so `mi-orders` still resolves while
/// `mi-orders-staging` exists.
pub async fn resolve_identity<D: Directory>(
    directory: &D,
    selector: &IdentitySelector,
) -> GraphResult<Resolution<ServicePrincipal>> {
    match selector {
        IdentitySelector::ObjectId(id) => Ok(directory.get_service_principal(*id).await?.into()),
        IdentitySelector::DisplayName(name) => Ok(narrow_to_exact(
            directory.search_service_principals(name).await?,
            name,
        )),
    }
}

/// Classify search hits, preferring exact display-name matches over loose ones.
fn narrow_to_exact(hits: Vec<ServicePrincipal>, name: &str) -> Resolution<ServicePrincipal> {
    if hits.len() <= 1 {
        return Resolution::from_matches(hits);
    }

    let total = hits.len();
    let name = name.to_lowercase();
    let exact: Vec<_> = hits
        .into_iter()
        .filter(|sp| sp.display_name.to_lowercase() == name)
        .collect();
    match exact.len() {
        0 => Resolution::Ambiguous(total),
        _ => Resolution::from_matches(exact),
    }
}

/// Resolve an application's service principal by exact display name.
pub async fn resolve_application<D: Directory>(
    directory: &D,
    name: &str,
) -> GraphResult<Resolution<ServicePrincipal>> {
    Ok(Resolution::from_matches(
        directory.find_service_principals_by_name(name).await?,
    ))
}
