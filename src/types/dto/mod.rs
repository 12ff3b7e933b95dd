// Data transfer objects - request and response models
pub mod common;
pub mod dcf_log;
pub mod permission;
pub mod role;
pub mod settings;
pub mod user;
