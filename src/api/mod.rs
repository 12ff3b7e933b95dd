// API layer - HTTP endpoints
pub mod dcf_logs;
pub mod health;
pub mod permissions;
pub mod roles;
pub mod settings;
pub mod users;

pub use dcf_logs::DcfLogApi;
pub use health::HealthApi;
pub use permissions::PermissionApi;
pub use roles::RoleApi;
pub use settings::SettingsApi;
pub use users::UserApi;
