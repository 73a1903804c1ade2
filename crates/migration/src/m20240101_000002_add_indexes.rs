//! Lookup index on `usuarios.name`.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_usuarios::Usuarios;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_usuarios_name")
                    .table(Usuarios::Table)
                    .col(Usuarios::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_usuarios_name").table(Usuarios::Table).to_owned())
            .await
    }
}
