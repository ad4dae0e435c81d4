use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tenants::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tenants::Budget).double())
                    .col(ColumnDef::new(Tenants::PreferredLocation).string())
                    .col(ColumnDef::new(Tenants::MoveInDate).date())
                    .col(ColumnDef::new(Tenants::Preferences).json().not_null())
                    .col(ColumnDef::new(Tenants::Documents).json().not_null())
                    .col(
                        ColumnDef::new(Tenants::ProfileCompletion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tenants::OnboardingCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tenants::ProfileCompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Tenants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tenants::UpdatedAt)
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
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    Budget,
    PreferredLocation,
    MoveInDate,
    Preferences,
    Documents,
    ProfileCompletion,
    OnboardingCompleted,
    ProfileCompletedAt,
    CreatedAt,
    UpdatedAt,
}
