use thiserror::Error;

use crate::errors::internal::InternalError;

/// Business errors raised by the admin services
///
/// Carries the failure taxonomy of the mutation guard: missing records,
/// uniqueness conflicts on create, and attempts to mutate protected
/// sentinel records. Infrastructure failures are wrapped transparently.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Username already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("{0}")]
    Protected(&'static str),

    #[error("No AI settings configured")]
    SettingsNotConfigured,

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AdminError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        AdminError::NotFound { entity, id }
    }

    pub fn duplicate_username(username: &str) -> Self {
        AdminError::DuplicateUsername {
            username: username.to_string(),
        }
    }
}
