use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::ApplicationId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::LandlordId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Transactions::Currency)
                            .string_len(3)
                            .not_null()
                            .default("NGN"),
                    )
                    .col(ColumnDef::new(Transactions::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Transactions::PaymentGateway).string().not_null())
                    .col(ColumnDef::new(Transactions::TransactionType).string().not_null())
                    .col(ColumnDef::new(Transactions::HeldAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Transactions::ReleasedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Transactions::RefundedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-transactions-application_id")
                    .table(Transactions::Table)
                    .col(Transactions::ApplicationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    ApplicationId,
    TenantId,
    LandlordId,
    PropertyId,
    Amount,
    Currency,
    Status,
    PaymentGateway,
    TransactionType,
    HeldAt,
    ReleasedAt,
    RefundedAt,
    Notes,
    CreatedAt,
}
