//! Create `usuarios` table.
//!
//! One row per registered person; `phone` carries the only unique constraint.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(pk_auto(Usuarios::Id))
                    .col(string(Usuarios::Name))
                    .col(string(Usuarios::Address))
                    .col(string_uniq(Usuarios::Phone))
                    .col(boolean(Usuarios::PickedUp).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usuarios::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Usuarios {
    Table,
    Id,
    Name,
    Address,
    Phone,
    PickedUp,
}
