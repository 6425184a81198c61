//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240110_000001_create_accounts_table;
mod m20240110_000002_create_profile_tables;
mod m20240111_000001_create_scheduling_tables;
mod m20240112_000001_create_messaging_tables;
mod m20240113_000001_create_group_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240110_000001_create_accounts_table::Migration),
            Box::new(m20240110_000002_create_profile_tables::Migration),
            Box::new(m20240111_000001_create_scheduling_tables::Migration),
            Box::new(m20240112_000001_create_messaging_tables::Migration),
            Box::new(m20240113_000001_create_group_tables::Migration),
        ]
    }
}
