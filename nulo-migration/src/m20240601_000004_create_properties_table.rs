use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Properties::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Properties::LandlordId).uuid().not_null())
                    .col(ColumnDef::new(Properties::Title).string().not_null())
                    .col(ColumnDef::new(Properties::Description).text())
                    .col(ColumnDef::new(Properties::RentAmount).double().not_null())
                    .col(ColumnDef::new(Properties::SecurityDeposit).double())
                    .col(
                        ColumnDef::new(Properties::AgencyFee)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Properties::Location).string().not_null())
                    .col(ColumnDef::new(Properties::Address).string())
                    .col(ColumnDef::new(Properties::City).string().not_null())
                    .col(ColumnDef::new(Properties::State).string().not_null())
                    .col(ColumnDef::new(Properties::Country).string().not_null())
                    .col(ColumnDef::new(Properties::Latitude).double())
                    .col(ColumnDef::new(Properties::Longitude).double())
                    .col(ColumnDef::new(Properties::Bedrooms).integer().not_null())
                    .col(ColumnDef::new(Properties::Bathrooms).integer().not_null())
                    .col(ColumnDef::new(Properties::SquareFeet).integer())
                    .col(ColumnDef::new(Properties::PropertyType).string_len(16).not_null())
                    .col(ColumnDef::new(Properties::Amenities).json().not_null())
                    .col(ColumnDef::new(Properties::Photos).json().not_null())
                    .col(ColumnDef::new(Properties::AvailabilityStart).date())
                    .col(
                        ColumnDef::new(Properties::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Properties::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Properties::FavoriteCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Properties::ApplicationCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Properties::Slug).string().unique_key())
                    .col(
                        ColumnDef::new(Properties::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Properties::VerifiedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Properties::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Properties::UpdatedAt)
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
                    .name("idx-properties-landlord_id")
                    .table(Properties::Table)
                    .col(Properties::LandlordId)
                    .to_owned(),
            )
            .await?;

        // Search always filters on status
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-properties-status")
                    .table(Properties::Table)
                    .col(Properties::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx-properties-rent_amount")
                    .table(Properties::Table)
                    .col(Properties::RentAmount)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    LandlordId,
    Title,
    Description,
    RentAmount,
    SecurityDeposit,
    AgencyFee,
    Location,
    Address,
    City,
    State,
    Country,
    Latitude,
    Longitude,
    Bedrooms,
    Bathrooms,
    SquareFeet,
    PropertyType,
    Amenities,
    Photos,
    AvailabilityStart,
    Status,
    ViewCount,
    FavoriteCount,
    ApplicationCount,
    Slug,
    Verified,
    VerifiedAt,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
