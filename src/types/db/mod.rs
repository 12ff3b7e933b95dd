// Database entities - SeaORM models
pub mod ai_settings;
pub mod dcf_log;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;
