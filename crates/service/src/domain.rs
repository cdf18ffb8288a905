//! Business view of members, meal entries and the rate setting.
//!
//! Field names on the wire follow the mess frontend (`memberName`, `mealDate`,
//! `guestMeals`, `_id`), so serde renames are spelled out per field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub use models::member::UpdateOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub address: String,
}

impl From<models::member::Model> for Member {
    fn from(m: models::member::Model) -> Self {
        Self { id: m.id, name: m.name, address: m.address }
    }
}

/// Input for `POST /memberAdd`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewMember {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Input for `PUT /memberUpdate/:id`; only these two fields are ever written.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberUpdate {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// One element of the `POST /addMeal` batch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MealDraft {
    pub member_id: Uuid,
    #[serde(rename = "memberName", default)]
    pub member_name: Option<String>,
    #[serde(rename = "memberAddress", default)]
    pub member_address: Option<String>,
    #[serde(rename = "guestMeals", default)]
    pub guest_meals: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub member_id: Uuid,
    #[serde(rename = "memberName")]
    pub member_name: Option<String>,
    #[serde(rename = "memberAddress")]
    pub member_address: Option<String>,
    #[serde(rename = "mealDate")]
    pub meal_date: NaiveDate,
    #[serde(rename = "guestMeals")]
    pub guest_meals: i32,
}

impl From<models::meal::Model> for MealEntry {
    fn from(m: models::meal::Model) -> Self {
        Self {
            id: m.id,
            member_id: m.member_id,
            member_name: m.member_name,
            member_address: m.member_address,
            meal_date: m.meal_date,
            guest_meals: m.guest_meals,
        }
    }
}

/// All entries recorded on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGroup {
    #[serde(rename = "_id")]
    pub date: NaiveDate,
    #[serde(rename = "totalMeals")]
    pub total_meals: usize,
    pub meals: Vec<MealEntry>,
}

/// Per-member totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyMemberSummary {
    pub member_id: Uuid,
    #[serde(rename = "memberName")]
    pub member_name: String,
    pub year: i32,
    pub month: u32,
    #[serde(rename = "totalMeals")]
    pub total_meals: u64,
    #[serde(rename = "totalGuestMeals")]
    pub total_guest_meals: i64,
    #[serde(rename = "mealDates")]
    pub meal_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSetting {
    #[serde(rename = "type")]
    pub key: String,
    pub value: f64,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<models::setting::Model> for RateSetting {
    fn from(m: models::setting::Model) -> Self {
        Self { key: m.key, value: m.value, updated_at: m.updated_at.with_timezone(&Utc) }
    }
}
