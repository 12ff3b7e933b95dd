// Stores layer - Data access and repository pattern
pub mod dcf_log_store;
pub mod permission_store;
pub mod role_store;
pub mod settings_store;
pub mod user_store;

pub use dcf_log_store::DcfLogStore;
pub use permission_store::PermissionStore;
pub use role_store::RoleStore;
pub use settings_store::SettingsStore;
pub use user_store::UserStore;

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};

/// Case-insensitive substring match: lower(col) LIKE '%term%'
pub(crate) fn contains_ignore_case(col: impl IntoColumnRef, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase());
    Expr::expr(Func::lower(Expr::col(col))).like(pattern)
}

/// Case-insensitive equality: lower(col) = lower(value)
pub(crate) fn eq_ignore_case(col: impl IntoColumnRef, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase())
}
