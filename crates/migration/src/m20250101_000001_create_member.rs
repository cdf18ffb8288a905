//! Create `member` table.
//!
//! Mess members; meal entries reference them informally (no foreign key, no cascade).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(uuid(Member::Id).primary_key())
                    .col(string_len(Member::Name, 128).not_null())
                    .col(string_len(Member::Address, 256).not_null().default(""))
                    .col(timestamp_with_time_zone(Member::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Member::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Member { Table, Id, Name, Address, CreatedAt }
