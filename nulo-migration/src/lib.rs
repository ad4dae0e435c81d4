pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users_table;
mod m20240601_000002_create_tenants_table;
mod m20240601_000003_create_landlords_table;
mod m20240601_000004_create_properties_table;
mod m20240601_000005_create_applications_table;
mod m20240601_000006_create_transactions_table;
mod m20240601_000007_create_favorites_table;
mod m20240601_000008_create_messages_table;
mod m20240602_000001_create_revoked_tokens_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users_table::Migration),
            Box::new(m20240601_000002_create_tenants_table::Migration),
            Box::new(m20240601_000003_create_landlords_table::Migration),
            Box::new(m20240601_000004_create_properties_table::Migration),
            Box::new(m20240601_000005_create_applications_table::Migration),
            Box::new(m20240601_000006_create_transactions_table::Migration),
            Box::new(m20240601_000007_create_favorites_table::Migration),
            Box::new(m20240601_000008_create_messages_table::Migration),
            Box::new(m20240602_000001_create_revoked_tokens_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        // A second run must find nothing pending and leave the schema alone
        Migrator::up(&db, None).await.unwrap();

        let pending = Migrator::get_pending_migrations(&db).await.unwrap();
        assert!(pending.is_empty());
    }
}
