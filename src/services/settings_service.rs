use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::{AdminError, InternalError};
use crate::services::ListCaches;
use crate::stores::SettingsStore;
use crate::types::db::ai_settings;
use crate::types::dto::settings::{AiSettingsResponse, UpdateSettingsRequest};

/// Business rules around the AI prompt settings
///
/// The first row by id is the active settings record; when no rows exist
/// the lookup fails. Rows are never created through this service, only
/// patched. The cache slot holds the active row, not the listing.
pub struct SettingsService {
    db: DatabaseConnection,
    settings_store: Arc<SettingsStore>,
    caches: Arc<ListCaches>,
}

impl SettingsService {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            settings_store: app_data.settings_store.clone(),
            caches: app_data.caches.clone(),
        }
    }

    /// All settings rows; never cached
    pub async fn list_all(&self) -> Result<Vec<AiSettingsResponse>, AdminError> {
        let rows = self.settings_store.find_all(&self.db).await?;
        Ok(rows.into_iter().map(AiSettingsResponse::from).collect())
    }

    /// The active settings row, served from the cache when populated
    pub async fn get_current(&self) -> Result<AiSettingsResponse, AdminError> {
        self.caches.settings.get_or_load(self.load_current()).await
    }

    async fn load_current(&self) -> Result<AiSettingsResponse, AdminError> {
        self.settings_store
            .find_first(&self.db)
            .await?
            .map(AiSettingsResponse::from)
            .ok_or(AdminError::SettingsNotConfigured)
    }

    /// Patch the key and agent prompts; the settings name is fixed
    pub async fn update(
        &self,
        id: i32,
        req: UpdateSettingsRequest,
    ) -> Result<AiSettingsResponse, AdminError> {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let settings = self
            .settings_store
            .find_by_id(&txn, id)
            .await?
            .ok_or(AdminError::not_found("Settings", id))?;

        let mut model: ai_settings::ActiveModel = settings.clone().into();
        if let Some(key) = req.key {
            model.key = Set(Some(key));
        }
        if let Some(prompt) = req.prompt_agent1 {
            model.prompt_agent1 = Set(Some(prompt));
        }
        if let Some(prompt) = req.prompt_agent2 {
            model.prompt_agent2 = Set(Some(prompt));
        }
        if let Some(prompt) = req.prompt_agent3 {
            model.prompt_agent3 = Set(Some(prompt));
        }
        if let Some(prompt) = req.prompt_agent4 {
            model.prompt_agent4 = Set(Some(prompt));
        }

        let settings = if model.is_changed() {
            self.settings_store.save(&txn, model).await?
        } else {
            settings
        };

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction_commit("update_settings", e))?;
        self.caches.settings.invalidate().await;

        tracing::info!(settings_id = id, "settings updated");
        Ok(AiSettingsResponse::from(settings))
    }
}
