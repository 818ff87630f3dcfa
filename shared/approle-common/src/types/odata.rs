//! OData Envelope Types

use serde::{Deserialize, Serialize};

/// One page of a Graph collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ODataPage<T> {
    pub value: Vec<T>,
    /// Absolute URL of the next page, if any.
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

/// Graph error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphErrorBody {
    pub error: GraphErrorDetail,
}

/// Graph error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphErrorDetail {
    /// Machine-readable error code (e.g. `Request_ResourceNotFound`).
    pub code: String,
    pub message: String,
}
