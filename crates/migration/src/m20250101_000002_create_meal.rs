//! Create `meal` table.
//!
//! One row per member per calendar day. `member_id` is deliberately not a
//! foreign key: deleting a member keeps its meal history.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Meal::Table)
                    .if_not_exists()
                    .col(uuid(Meal::Id).primary_key())
                    .col(uuid(Meal::MemberId).not_null())
                    .col(string_len_null(Meal::MemberName, 128))
                    .col(string_len_null(Meal::MemberAddress, 256))
                    .col(date(Meal::MealDate).not_null())
                    .col(integer(Meal::GuestMeals).not_null().default(0))
                    .col(timestamp_with_time_zone(Meal::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Meal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Meal { Table, Id, MemberId, MemberName, MemberAddress, MealDate, GuestMeals, CreatedAt }
