use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AiSettings::Name).string().not_null())
                    .col(ColumnDef::new(AiSettings::Key).string().null())
                    .col(ColumnDef::new(AiSettings::PromptAgent1).text().null())
                    .col(ColumnDef::new(AiSettings::PromptAgent2).text().null())
                    .col(ColumnDef::new(AiSettings::PromptAgent3).text().null())
                    .col(ColumnDef::new(AiSettings::PromptAgent4).text().null())
                    .to_owned(),
            )
            .await?;

        // Seed the default settings row. Rows are only ever updated through the
        // HTTP contract, never created, so the schema owns the initial record.
        manager
            .exec_stmt(
                Query::insert()
                    .into_table(AiSettings::Table)
                    .columns([AiSettings::Name])
                    .values_panic(["default".into()])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiSettings {
    Table,
    Id,
    Name,
    Key,
    PromptAgent1,
    PromptAgent2,
    PromptAgent3,
    PromptAgent4,
}
