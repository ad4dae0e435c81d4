use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Landlords::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Landlords::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Landlords::OwnershipDocs).json().not_null())
                    .col(ColumnDef::new(Landlords::VerificationSubmittedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Landlords::VerificationApprovedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Landlords::GuaranteeJoined)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Landlords::GuaranteeContribution)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Landlords::BankAccountNumber).string())
                    .col(ColumnDef::new(Landlords::BankName).string())
                    .col(
                        ColumnDef::new(Landlords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Landlords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Landlords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Landlords {
    Table,
    Id,
    OwnershipDocs,
    VerificationSubmittedAt,
    VerificationApprovedAt,
    GuaranteeJoined,
    GuaranteeContribution,
    BankAccountNumber,
    BankName,
    CreatedAt,
    UpdatedAt,
}
