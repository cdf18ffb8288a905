use async_trait::async_trait;
use chrono::NaiveDate;
use models::meal::NewMeal;
use uuid::Uuid;

use crate::domain::{Member, MealEntry, MemberUpdate, NewMember, RateSetting, UpdateOutcome};
use crate::errors::ServiceError;
use crate::period::DateRange;

/// Persistence for the member registry.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn insert_member(&self, input: &NewMember) -> Result<Member, ServiceError>;
    async fn list_members(&self) -> Result<Vec<Member>, ServiceError>;
    async fn update_member(&self, id: Uuid, input: &MemberUpdate) -> Result<UpdateOutcome, ServiceError>;
    async fn delete_member(&self, id: Uuid) -> Result<u64, ServiceError>;
}

/// Persistence for the meal ledger.
#[async_trait]
pub trait MealRepository: Send + Sync {
    async fn recorded_member_ids(&self, member_ids: &[Uuid], date: NaiveDate) -> Result<Vec<Uuid>, ServiceError>;
    /// Atomic per `(member_id, meal_date)`: `Ok(None)` when a row already exists.
    async fn insert_meal_if_absent(&self, meal: NewMeal) -> Result<Option<MealEntry>, ServiceError>;
    /// Entries ordered by date, then insertion; all entries when `range` is `None`.
    async fn list_meals(&self, range: Option<DateRange>) -> Result<Vec<MealEntry>, ServiceError>;
    async fn sum_guest_meals(&self, range: DateRange) -> Result<i64, ServiceError>;
}

/// Persistence for key/value settings such as the meal rate.
#[async_trait]
pub trait RateRepository: Send + Sync {
    async fn get_setting(&self, key: &str) -> Result<Option<f64>, ServiceError>;
    async fn upsert_setting(&self, key: &str, value: f64) -> Result<RateSetting, ServiceError>;
}

/// The single data-access handle injected at startup.
pub trait MessRepository: MemberRepository + MealRepository + RateRepository {}

impl<T: MemberRepository + MealRepository + RateRepository> MessRepository for T {}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    pub struct InMemoryRepository {
        members: Mutex<Vec<Member>>,
        meals: Mutex<Vec<MealEntry>>,
        settings: Mutex<HashMap<String, RateSetting>>,
        unavailable: bool,
    }

    impl InMemoryRepository {
        /// A store whose every call fails like an unreachable database.
        pub fn unavailable() -> Self {
            Self { unavailable: true, ..Default::default() }
        }

        /// Seed a meal row directly, bypassing the ledger's per-day check.
        pub fn push_meal(&self, entry: MealEntry) {
            self.meals.lock().unwrap().push(entry);
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.unavailable {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MemberRepository for InMemoryRepository {
        async fn insert_member(&self, input: &NewMember) -> Result<Member, ServiceError> {
            self.check()?;
            let member = Member {
                id: Uuid::new_v4(),
                name: input.name.trim().to_string(),
                address: input.address.trim().to_string(),
            };
            self.members.lock().unwrap().push(member.clone());
            Ok(member)
        }

        async fn list_members(&self) -> Result<Vec<Member>, ServiceError> {
            self.check()?;
            Ok(self.members.lock().unwrap().clone())
        }

        async fn update_member(&self, id: Uuid, input: &MemberUpdate) -> Result<UpdateOutcome, ServiceError> {
            self.check()?;
            let mut members = self.members.lock().unwrap();
            let Some(found) = members.iter_mut().find(|m| m.id == id) else {
                return Ok(UpdateOutcome::NotFound);
            };
            let (name, address) = (input.name.trim(), input.address.trim());
            if found.name == name && found.address == address {
                return Ok(UpdateOutcome::Unchanged);
            }
            found.name = name.to_string();
            found.address = address.to_string();
            Ok(UpdateOutcome::Updated)
        }

        async fn delete_member(&self, id: Uuid) -> Result<u64, ServiceError> {
            self.check()?;
            let mut members = self.members.lock().unwrap();
            let before = members.len();
            members.retain(|m| m.id != id);
            Ok((before - members.len()) as u64)
        }
    }

    #[async_trait]
    impl MealRepository for InMemoryRepository {
        async fn recorded_member_ids(&self, member_ids: &[Uuid], date: NaiveDate) -> Result<Vec<Uuid>, ServiceError> {
            self.check()?;
            let meals = self.meals.lock().unwrap();
            Ok(meals
                .iter()
                .filter(|m| m.meal_date == date && member_ids.contains(&m.member_id))
                .map(|m| m.member_id)
                .collect())
        }

        async fn insert_meal_if_absent(&self, meal: NewMeal) -> Result<Option<MealEntry>, ServiceError> {
            self.check()?;
            let mut meals = self.meals.lock().unwrap();
            if meals.iter().any(|m| m.member_id == meal.member_id && m.meal_date == meal.meal_date) {
                return Ok(None);
            }
            let entry = MealEntry {
                id: Uuid::new_v4(),
                member_id: meal.member_id,
                member_name: meal.member_name,
                member_address: meal.member_address,
                meal_date: meal.meal_date,
                guest_meals: meal.guest_meals,
            };
            meals.push(entry.clone());
            Ok(Some(entry))
        }

        async fn list_meals(&self, range: Option<DateRange>) -> Result<Vec<MealEntry>, ServiceError> {
            self.check()?;
            let mut rows: Vec<MealEntry> = self
                .meals
                .lock()
                .unwrap()
                .iter()
                .filter(|m| range.map_or(true, |r| r.contains(m.meal_date)))
                .cloned()
                .collect();
            // stable sort keeps insertion order within a date
            rows.sort_by_key(|m| m.meal_date);
            Ok(rows)
        }

        async fn sum_guest_meals(&self, range: DateRange) -> Result<i64, ServiceError> {
            self.check()?;
            let meals = self.meals.lock().unwrap();
            Ok(meals
                .iter()
                .filter(|m| range.contains(m.meal_date))
                .map(|m| i64::from(m.guest_meals))
                .sum())
        }
    }

    #[async_trait]
    impl RateRepository for InMemoryRepository {
        async fn get_setting(&self, key: &str) -> Result<Option<f64>, ServiceError> {
            self.check()?;
            Ok(self.settings.lock().unwrap().get(key).map(|s| s.value))
        }

        async fn upsert_setting(&self, key: &str, value: f64) -> Result<RateSetting, ServiceError> {
            self.check()?;
            let setting = RateSetting { key: key.to_string(), value, updated_at: Utc::now() };
            self.settings.lock().unwrap().insert(key.to_string(), setting.clone());
            Ok(setting)
        }
    }
}
