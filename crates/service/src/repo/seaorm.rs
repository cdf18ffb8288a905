use async_trait::async_trait;
use chrono::NaiveDate;
use models::meal::NewMeal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Member, MealEntry, MemberUpdate, NewMember, RateSetting, UpdateOutcome};
use crate::errors::ServiceError;
use crate::period::DateRange;
use crate::repository::{MealRepository, MemberRepository, RateRepository};

/// SeaORM-backed repository; one pooled connection shared by every handler.
#[derive(Clone)]
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MemberRepository for SeaOrmRepository {
    async fn insert_member(&self, input: &NewMember) -> Result<Member, ServiceError> {
        let created = models::member::create(&self.db, &input.name, &input.address).await?;
        Ok(created.into())
    }

    async fn list_members(&self) -> Result<Vec<Member>, ServiceError> {
        let rows = models::member::list(&self.db).await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn update_member(&self, id: Uuid, input: &MemberUpdate) -> Result<UpdateOutcome, ServiceError> {
        Ok(models::member::update_details(&self.db, id, &input.name, &input.address).await?)
    }

    async fn delete_member(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(models::member::delete(&self.db, id).await?)
    }
}

#[async_trait]
impl MealRepository for SeaOrmRepository {
    async fn recorded_member_ids(&self, member_ids: &[Uuid], date: NaiveDate) -> Result<Vec<Uuid>, ServiceError> {
        Ok(models::meal::recorded_member_ids(&self.db, member_ids, date).await?)
    }

    async fn insert_meal_if_absent(&self, meal: NewMeal) -> Result<Option<MealEntry>, ServiceError> {
        let inserted = models::meal::insert_if_absent(&self.db, meal).await?;
        Ok(inserted.map(MealEntry::from))
    }

    async fn list_meals(&self, range: Option<DateRange>) -> Result<Vec<MealEntry>, ServiceError> {
        let rows = models::meal::list_between(&self.db, range.map(|r| (r.start, r.end))).await?;
        Ok(rows.into_iter().map(MealEntry::from).collect())
    }

    async fn sum_guest_meals(&self, range: DateRange) -> Result<i64, ServiceError> {
        Ok(models::meal::sum_guest_meals(&self.db, range.start, range.end).await?)
    }
}

#[async_trait]
impl RateRepository for SeaOrmRepository {
    async fn get_setting(&self, key: &str) -> Result<Option<f64>, ServiceError> {
        Ok(models::setting::get_value(&self.db, key).await?)
    }

    async fn upsert_setting(&self, key: &str, value: f64) -> Result<RateSetting, ServiceError> {
        let stored = models::setting::upsert(&self.db, key, value).await?;
        Ok(stored.into())
    }
}
