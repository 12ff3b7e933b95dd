// Services layer - Business rules: mutation guards and cache coherency
pub mod crypto;
pub mod dcf_log_service;
pub mod entity_cache;
pub mod permission_service;
pub mod role_service;
pub mod settings_service;
pub mod user_service;

pub use crypto::CredentialHasher;
pub use dcf_log_service::DcfLogService;
pub use entity_cache::{EntityCache, ListCaches};
pub use permission_service::PermissionService;
pub use role_service::RoleService;
pub use settings_service::SettingsService;
pub use user_service::UserService;
