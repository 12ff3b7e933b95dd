use poem_openapi::types::{ParseFromJSON, ToJSON};
use poem_openapi::{ApiResponse, Object};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Service version
    pub version: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// One page of results from a paginated listing
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct PageResponse<T: ParseFromJSON + ToJSON> {
    /// Rows on this page
    pub content: Vec<T>,

    /// Zero-based page index
    pub number: u64,

    /// Requested page size
    pub size: u64,

    /// Total row count across all pages
    pub total_elements: u64,

    /// Total page count
    pub total_pages: u64,
}

/// Empty response for successful delete operations
#[derive(ApiResponse, Debug)]
pub enum DeletedResponse {
    /// Record removed
    #[oai(status = 204)]
    NoContent,
}
