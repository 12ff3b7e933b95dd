use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder};

use crate::errors::InternalError;
use crate::types::db::ai_settings::{self, Entity as AiSettings};

/// SettingsStore is the persistence gateway for the ai_settings table.
///
/// Rows are provisioned by the schema migration; the exposed contract only
/// ever reads and updates them.
pub struct SettingsStore {}

impl SettingsStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_all(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<ai_settings::Model>, InternalError> {
        AiSettings::find()
            .order_by_asc(ai_settings::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_all_settings", e))
    }

    /// The active settings row: the first row by id, if any
    pub async fn find_first(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Option<ai_settings::Model>, InternalError> {
        AiSettings::find()
            .order_by_asc(ai_settings::Column::Id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_first_settings", e))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<ai_settings::Model>, InternalError> {
        AiSettings::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_settings_by_id", e))
    }

    pub async fn save(
        &self,
        conn: &impl ConnectionTrait,
        model: ai_settings::ActiveModel,
    ) -> Result<ai_settings::Model, InternalError> {
        model
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_settings", e))
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
