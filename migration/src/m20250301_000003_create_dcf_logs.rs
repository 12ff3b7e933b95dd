use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DcfLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DcfLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DcfLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DcfLogs::Username).string().not_null())
                    .col(ColumnDef::new(DcfLogs::CompanyName).string().not_null())
                    .col(ColumnDef::new(DcfLogs::Description).text().null())
                    .col(ColumnDef::new(DcfLogs::ValidationStatus).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_dcf_logs_created_at")
                    .table(DcfLogs::Table)
                    .col(DcfLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DcfLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DcfLogs {
    Table,
    Id,
    CreatedAt,
    Username,
    CompanyName,
    Description,
    ValidationStatus,
}
