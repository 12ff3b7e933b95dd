use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{permission, role};
use crate::types::dto::permission::PermissionResponse;

/// Role with its resolved permission set
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
    pub permissions: Vec<PermissionResponse>,
}

impl RoleResponse {
    pub fn from_parts(role: role::Model, permissions: Vec<permission::Model>) -> Self {
        Self {
            id: role.id,
            name: role.name,
            permissions: permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

/// Request model for creating a role
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub name: String,

    /// Permission ids to attach; ids that do not resolve are dropped
    pub permission_ids: Option<Vec<i32>>,
}

/// Request model for updating a role; absent fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub name: Option<String>,

    /// When present, fully replaces the role's permission set
    pub permission_ids: Option<Vec<i32>>,
}
