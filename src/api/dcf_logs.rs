use std::sync::Arc;

use poem_openapi::param::Query;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::errors::AdminApiError;
use crate::services::DcfLogService;
use crate::types::dto::common::PageResponse;
use crate::types::dto::dcf_log::{CreateDcfLogRequest, DcfLogResponse, DcfLogStatsResponse};
use crate::types::internal::PageRequest;

/// DCF analysis log API endpoints
pub struct DcfLogApi {
    dcf_log_service: DcfLogService,
}

impl DcfLogApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            dcf_log_service: DcfLogService::new(app_data),
        }
    }
}

/// API tags for analysis log endpoints
#[derive(Tags)]
enum DcfLogTags {
    /// DCF analysis log
    DcfLogs,
}

#[OpenApi(prefix_path = "/dcf-logs")]
impl DcfLogApi {
    /// Paginated log entries, newest first
    #[oai(path = "/", method = "get", tag = "DcfLogTags::DcfLogs")]
    pub async fn list(
        &self,
        page: Query<Option<u64>>,
        size: Query<Option<u64>>,
    ) -> Result<Json<PageResponse<DcfLogResponse>>, AdminApiError> {
        let page_request = PageRequest::from_params(page.0, size.0);
        Ok(Json(self.dcf_log_service.list_page(page_request).await?))
    }

    /// Aggregate statistics over the whole log
    #[oai(path = "/stats", method = "get", tag = "DcfLogTags::DcfLogs")]
    pub async fn stats(&self) -> Result<Json<DcfLogStatsResponse>, AdminApiError> {
        Ok(Json(self.dcf_log_service.stats().await?))
    }

    /// Record one analysis run; the timestamp is server-assigned
    #[oai(path = "/", method = "post", tag = "DcfLogTags::DcfLogs")]
    pub async fn create(
        &self,
        body: Json<CreateDcfLogRequest>,
    ) -> Result<Json<DcfLogResponse>, AdminApiError> {
        Ok(Json(self.dcf_log_service.create(body.0).await?))
    }
}
