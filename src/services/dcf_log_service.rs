use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveValue::NotSet, DatabaseConnection, Set};

use crate::app_data::AppData;
use crate::errors::AdminError;
use crate::stores::DcfLogStore;
use crate::types::db::dcf_log;
use crate::types::dto::common::PageResponse;
use crate::types::dto::dcf_log::{CreateDcfLogRequest, DcfLogResponse, DcfLogStatsResponse};
use crate::types::internal::PageRequest;

/// Append-only recording of DCF analysis runs plus aggregate statistics
///
/// Entries are never updated or deleted, so no cache and no guard apply;
/// the creation timestamp is always assigned here, never client-supplied.
pub struct DcfLogService {
    db: DatabaseConnection,
    dcf_log_store: Arc<DcfLogStore>,
}

impl DcfLogService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            dcf_log_store: app_data.dcf_log_store.clone(),
        }
    }

    /// One page of log entries, newest first
    pub async fn list_page(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<DcfLogResponse>, AdminError> {
        let (rows, total_elements, total_pages) =
            self.dcf_log_store.find_page(&self.db, page).await?;

        Ok(PageResponse {
            content: rows.into_iter().map(DcfLogResponse::from).collect(),
            number: page.page,
            size: page.size,
            total_elements,
            total_pages,
        })
    }

    /// Record one analysis run with a server-assigned timestamp
    pub async fn create(&self, req: CreateDcfLogRequest) -> Result<DcfLogResponse, AdminError> {
        let model = dcf_log::ActiveModel {
            id: NotSet,
            created_at: Set(Utc::now().timestamp()),
            username: Set(req.username),
            company_name: Set(req.company_name),
            description: Set(req.description),
            validation_status: Set(req.validation_status),
        };

        let created = self.dcf_log_store.insert(&self.db, model).await?;

        tracing::info!(
            log_id = created.id,
            company = %created.company_name,
            "dcf analysis logged"
        );
        Ok(DcfLogResponse::from(created))
    }

    /// Aggregate statistics over the whole log
    pub async fn stats(&self) -> Result<DcfLogStatsResponse, AdminError> {
        let total_analyses = self.dcf_log_store.count(&self.db).await?;
        let validated_count = self
            .dcf_log_store
            .count_status_contains(&self.db, "Validated")
            .await?;
        let unique_companies = self.dcf_log_store.count_distinct_companies(&self.db).await?;

        Ok(DcfLogStatsResponse {
            total_analyses,
            validated_count,
            unique_companies,
        })
    }
}
