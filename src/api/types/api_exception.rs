use serde::{Deserialize, Serialize};

/// Structured error body, `{"error": {...}}`
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiExceptionResponse {
    pub error: ApiExceptionError,
}

#[allow(missing_docs)]
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiExceptionError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub target: Option<String>,
    #[serde(rename = "correlationID")]
    pub correlation_id: Option<String>,
}
