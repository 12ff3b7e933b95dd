use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::{CredentialHasher, ListCaches};
use crate::stores::{DcfLogStore, PermissionStore, RoleStore, SettingsStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across services.
/// The per-family list caches live here so that every service instance,
/// however constructed, invalidates the one authoritative cache slot.
///
/// # Architecture
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(db)
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ hasher (Arc<CredentialHasher>)
///   ├─ caches (Arc<ListCaches>)
///   └─ per-entity stores (Arc<UserStore>, Arc<RoleStore>, ...)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to API constructors
///   ├─ UserApi::new(app_data)       → builds UserService
///   ├─ RoleApi::new(app_data)       → builds RoleService
///   ├─ PermissionApi::new(app_data) → builds PermissionService
///   ├─ SettingsApi::new(app_data)   → builds SettingsService
///   └─ DcfLogApi::new(app_data)     → builds DcfLogService
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub hasher: Arc<CredentialHasher>,
    pub caches: Arc<ListCaches>,
    pub user_store: Arc<UserStore>,
    pub role_store: Arc<RoleStore>,
    pub permission_store: Arc<PermissionStore>,
    pub settings_store: Arc<SettingsStore>,
    pub dcf_log_store: Arc<DcfLogStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database connection should be migrated before calling this.
    pub fn new(db: DatabaseConnection) -> Self {
        tracing::debug!("Initializing AppData");

        Self {
            db,
            hasher: Arc::new(CredentialHasher::new()),
            caches: Arc::new(ListCaches::new()),
            user_store: Arc::new(UserStore::new()),
            role_store: Arc::new(RoleStore::new()),
            permission_store: Arc::new(PermissionStore::new()),
            settings_store: Arc::new(SettingsStore::new()),
            dcf_log_store: Arc::new(DcfLogStore::new()),
        }
    }
}
