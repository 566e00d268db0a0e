//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use pitchhub_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page. Falls back to the endpoint's configured size.
    pub per_page: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest` using `default_size` when `per_page` is absent.
    pub fn into_page_request(self, default_size: u64) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(default_size),
        )
    }
}
