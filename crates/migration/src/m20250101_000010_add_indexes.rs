use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Meal: composite unique (member_id, meal_date); backs insert-if-absent
        manager
            .create_index(
                Index::create()
                    .name("uniq_meal_member_date")
                    .table(Meal::Table)
                    .col(Meal::MemberId)
                    .col(Meal::MealDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Meal: index on meal_date for period filters
        manager
            .create_index(
                Index::create()
                    .name("idx_meal_date")
                    .table(Meal::Table)
                    .col(Meal::MealDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_meal_member_date").table(Meal::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_meal_date").table(Meal::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Meal { Table, MemberId, MealDate }
