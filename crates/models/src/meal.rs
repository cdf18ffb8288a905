use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, QuerySelect, Set, SqlErr};
use uuid::Uuid;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub member_address: Option<String>,
    pub meal_date: Date,
    pub guest_meals: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a meal row supplied by the ledger.
#[derive(Clone, Debug)]
pub struct NewMeal {
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub member_address: Option<String>,
    pub meal_date: NaiveDate,
    pub guest_meals: i32,
}

pub fn validate_guest_meals(guest_meals: i32) -> Result<(), ModelError> {
    if guest_meals < 0 {
        return Err(ModelError::Validation("guestMeals must be >= 0".into()));
    }
    Ok(())
}

/// Members among `member_ids` that already have a row on `date`.
pub async fn recorded_member_ids(db: &DatabaseConnection, member_ids: &[Uuid], date: NaiveDate) -> Result<Vec<Uuid>, ModelError> {
    if member_ids.is_empty() {
        return Ok(Vec::new());
    }
    let ids = Entity::find()
        .select_only()
        .column(Column::MemberId)
        .filter(Column::MemberId.is_in(member_ids.iter().copied()))
        .filter(Column::MealDate.eq(date))
        .into_tuple::<Uuid>()
        .all(db)
        .await?;
    Ok(ids)
}

/// Insert unless `(member_id, meal_date)` already exists.
///
/// The unique index `uniq_meal_member_date` makes this atomic; a violation
/// yields `Ok(None)` instead of an error.
pub async fn insert_if_absent(db: &DatabaseConnection, meal: NewMeal) -> Result<Option<Model>, ModelError> {
    validate_guest_meals(meal.guest_meals)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        member_id: Set(meal.member_id),
        member_name: Set(meal.member_name),
        member_address: Set(meal.member_address),
        meal_date: Set(meal.meal_date),
        guest_meals: Set(meal.guest_meals),
        created_at: Set(Utc::now().into()),
    };
    match am.insert(db).await {
        Ok(m) => Ok(Some(m)),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Rows within the inclusive date range (all rows when `None`), oldest date first.
pub async fn list_between(db: &DatabaseConnection, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<Model>, ModelError> {
    let mut q = Entity::find();
    if let Some((start, end)) = range {
        q = q.filter(Column::MealDate.between(start, end));
    }
    let rows = q
        .order_by_asc(Column::MealDate)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

/// `SUM(guest_meals)` within the inclusive date range; 0 when nothing matches.
pub async fn sum_guest_meals(db: &DatabaseConnection, start: NaiveDate, end: NaiveDate) -> Result<i64, ModelError> {
    let total = Entity::find()
        .select_only()
        .column_as(Column::GuestMeals.sum(), "total")
        .filter(Column::MealDate.between(start, end))
        .into_tuple::<Option<i64>>()
        .one(db)
        .await?;
    Ok(total.flatten().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_guest_meals_rejected() {
        assert!(validate_guest_meals(-1).is_err());
        assert!(validate_guest_meals(0).is_ok());
        assert!(validate_guest_meals(3).is_ok());
    }
}
