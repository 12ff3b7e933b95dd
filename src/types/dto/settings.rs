use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::ai_settings;

/// AI agent prompt settings as returned by the API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AiSettingsResponse {
    pub id: i32,
    pub name: String,
    pub key: Option<String>,
    pub prompt_agent1: Option<String>,
    pub prompt_agent2: Option<String>,
    pub prompt_agent3: Option<String>,
    pub prompt_agent4: Option<String>,
}

impl From<ai_settings::Model> for AiSettingsResponse {
    fn from(model: ai_settings::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            key: model.key,
            prompt_agent1: model.prompt_agent1,
            prompt_agent2: model.prompt_agent2,
            prompt_agent3: model.prompt_agent3,
            prompt_agent4: model.prompt_agent4,
        }
    }
}

/// Request model for updating settings; absent fields are left unchanged.
/// The settings name is fixed and not patchable.
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub key: Option<String>,
    pub prompt_agent1: Option<String>,
    pub prompt_agent2: Option<String>,
    pub prompt_agent3: Option<String>,
    pub prompt_agent4: Option<String>,
}
