//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_member;
mod m20250101_000002_create_meal;
mod m20250101_000003_create_setting;
mod m20250101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_member::Migration),
            Box::new(m20250101_000002_create_meal::Migration),
            Box::new(m20250101_000003_create_setting::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000010_add_indexes::Migration),
        ]
    }
}
