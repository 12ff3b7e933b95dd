use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::app_data::AppData;
use crate::errors::AdminApiError;
use crate::services::SettingsService;
use crate::types::dto::settings::{AiSettingsResponse, UpdateSettingsRequest};

/// AI prompt settings API endpoints
pub struct SettingsApi {
    settings_service: SettingsService,
}

impl SettingsApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            settings_service: SettingsService::new(app_data),
        }
    }
}

/// API tags for settings endpoints
#[derive(Tags)]
enum SettingsTags {
    /// AI prompt settings
    Settings,
}

#[OpenApi(prefix_path = "/settings")]
impl SettingsApi {
    /// All settings rows
    #[oai(path = "/", method = "get", tag = "SettingsTags::Settings")]
    async fn list(&self) -> Result<Json<Vec<AiSettingsResponse>>, AdminApiError> {
        Ok(Json(self.settings_service.list_all().await?))
    }

    /// The active settings row
    #[oai(path = "/current", method = "get", tag = "SettingsTags::Settings")]
    async fn current(&self) -> Result<Json<AiSettingsResponse>, AdminApiError> {
        Ok(Json(self.settings_service.get_current().await?))
    }

    /// Patch the key and agent prompts; absent fields are left unchanged
    #[oai(path = "/:id", method = "put", tag = "SettingsTags::Settings")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<UpdateSettingsRequest>,
    ) -> Result<Json<AiSettingsResponse>, AdminApiError> {
        Ok(Json(self.settings_service.update(id.0, body.0).await?))
    }
}
