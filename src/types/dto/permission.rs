use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::permission;

/// Permission as returned by the API
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    pub id: i32,
    pub name: String,
}

impl From<permission::Model> for PermissionResponse {
    fn from(model: permission::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Request model for creating a permission
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreatePermissionRequest {
    pub name: String,
}

/// Request model for updating a permission; absent fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdatePermissionRequest {
    pub name: Option<String>,
}
