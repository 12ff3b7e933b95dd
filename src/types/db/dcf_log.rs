use sea_orm::entity::prelude::*;

/// Append-only log of DCF analysis runs. `created_at` is a unix timestamp
/// assigned by the server at insertion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "dcf_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: i64,
    pub username: String,
    pub company_name: String,
    pub description: Option<String>,
    pub validation_status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
