use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;
use crate::types::dto::role::RoleResponse;

/// User as returned by the API. The password hash is never serialized.
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub language: String,
    pub roles: Vec<RoleResponse>,
}

impl UserResponse {
    pub fn from_parts(user: user::Model, roles: Vec<RoleResponse>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            firstname: user.firstname,
            lastname: user.lastname,
            language: user.language,
            roles,
        }
    }
}

/// Request model for creating a user
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,

    /// Plaintext password; stored only as an Argon2id hash
    pub password: String,

    pub firstname: Option<String>,

    pub lastname: Option<String>,

    /// Defaults to "en" when absent
    pub language: Option<String>,

    /// Optional role to attach; fails with 404 when the id does not resolve
    pub role_id: Option<i32>,
}

/// Request model for updating a user; absent fields are left unchanged.
///
/// A blank password is treated the same as an absent one so that a
/// round-tripped form cannot wipe the stored hash.
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,

    pub password: Option<String>,

    pub firstname: Option<String>,

    pub lastname: Option<String>,

    pub language: Option<String>,

    /// When present, replaces the user's role set with this single role
    pub role_id: Option<i32>,
}
