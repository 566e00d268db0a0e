//! Response types for API endpoints.

use serde::{Deserialize, Serialize};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code, e.g. `VALIDATION_ERROR`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details, e.g. `{"field": "booking_date"}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// An error body without details.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Key the error to the request field the form should highlight.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.details = Some(serde_json::json!({ "field": field.into() }));
        self
    }
}
