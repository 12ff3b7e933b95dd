use chrono::DateTime;
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::dcf_log;

/// DCF analysis log entry as returned by the API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct DcfLogResponse {
    pub id: i32,

    /// Creation time in RFC 3339 format, assigned by the server
    pub created_at: String,

    pub username: String,

    pub company_name: String,

    pub description: Option<String>,

    pub validation_status: Option<String>,
}

impl From<dcf_log::Model> for DcfLogResponse {
    fn from(model: dcf_log::Model) -> Self {
        Self {
            id: model.id,
            created_at: DateTime::from_timestamp(model.created_at, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            username: model.username,
            company_name: model.company_name,
            description: model.description,
            validation_status: model.validation_status,
        }
    }
}

/// Request model for recording a DCF analysis run
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateDcfLogRequest {
    pub username: String,

    pub company_name: String,

    pub description: Option<String>,

    pub validation_status: Option<String>,
}

/// Aggregate statistics over the analysis log
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct DcfLogStatsResponse {
    /// Total number of logged analyses
    pub total_analyses: u64,

    /// Entries whose validation status contains "Validated" (case-insensitive)
    pub validated_count: u64,

    /// Number of distinct company names across all entries
    pub unique_companies: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_response_serializes_camel_case() {
        let response = DcfLogResponse::from(dcf_log::Model {
            id: 1,
            created_at: 1_700_000_000,
            username: "analyst".to_string(),
            company_name: "Acme Corp".to_string(),
            description: None,
            validation_status: Some("Validated - OK".to_string()),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("companyName").is_some());
        assert!(value.get("validationStatus").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("company_name").is_none());
    }

    #[test]
    fn test_stats_serializes_camel_case() {
        let stats = DcfLogStatsResponse {
            total_analyses: 2,
            validated_count: 1,
            unique_companies: 1,
        };

        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value.get("totalAnalyses").unwrap(), 2);
        assert_eq!(value.get("validatedCount").unwrap(), 1);
        assert_eq!(value.get("uniqueCompanies").unwrap(), 1);
    }

    #[test]
    fn test_created_at_renders_rfc3339() {
        let response = DcfLogResponse::from(dcf_log::Model {
            id: 1,
            created_at: 0,
            username: "analyst".to_string(),
            company_name: "Acme Corp".to_string(),
            description: None,
            validation_status: None,
        });

        assert_eq!(response.created_at, "1970-01-01T00:00:00+00:00");
    }
}

