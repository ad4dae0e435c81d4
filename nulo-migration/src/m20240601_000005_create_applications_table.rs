use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Applications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Applications::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Applications::PropertyId).uuid().not_null())
                    .col(
                        ColumnDef::new(Applications::Status)
                            .string_len(16)
                            .not_null()
                            .default("submitted"),
                    )
                    .col(ColumnDef::new(Applications::Message).text())
                    .col(ColumnDef::new(Applications::ProposedMoveInDate).date())
                    .col(ColumnDef::new(Applications::Documents).json().not_null())
                    .col(ColumnDef::new(Applications::RejectionReason).text())
                    .col(ColumnDef::new(Applications::ReasonCode).string())
                    .col(ColumnDef::new(Applications::ReviewedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Applications::ReviewedBy).uuid())
                    .col(
                        ColumnDef::new(Applications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Applications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One application per tenant and property
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-applications-tenant_property")
                    .table(Applications::Table)
                    .col(Applications::TenantId)
                    .col(Applications::PropertyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-applications-property_id")
                    .table(Applications::Table)
                    .col(Applications::PropertyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    TenantId,
    PropertyId,
    Status,
    Message,
    ProposedMoveInDate,
    Documents,
    RejectionReason,
    ReasonCode,
    ReviewedAt,
    ReviewedBy,
    CreatedAt,
    UpdatedAt,
}
