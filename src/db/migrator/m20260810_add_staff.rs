use sea_orm_migration::prelude::*;

// The Agent Hub auth tables (user, agent, token, tokenuser, tokenagent) are
// owned and migrated by the hub itself. This service only creates its own
// staff table.

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Staff::Name).string().not_null())
                    .col(ColumnDef::new(Staff::Email).string().null())
                    .col(
                        ColumnDef::new(Staff::Schedule)
                            .string()
                            .not_null()
                            .default("{}"),
                    )
                    .col(
                        ColumnDef::new(Staff::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Staff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on name for the sorted list endpoint
        manager
            .create_index(
                Index::create()
                    .name("idx_staff_name")
                    .table(Staff::Table)
                    .col(Staff::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    Name,
    Email,
    Schedule,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
