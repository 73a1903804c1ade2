//! Migrator creating the single `usuarios` table.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_usuarios;
mod m20240101_000002_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_usuarios::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000002_add_indexes::Migration),
        ]
    }
}
