use sea_orm::{entity::prelude::*, sea_query::OnConflict, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Key of the singleton per-meal price row.
pub const MEAL_RATE_KEY: &str = "mealRate";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "setting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: f64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rate(value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::Validation("rate must be a finite number >= 0".into()));
    }
    Ok(())
}

pub async fn get_value(db: &DatabaseConnection, key: &str) -> Result<Option<f64>, ModelError> {
    Ok(Entity::find_by_id(key.to_string()).one(db).await?.map(|m| m.value))
}

/// Insert or overwrite the value stored under `key`.
pub async fn upsert(db: &DatabaseConnection, key: &str, value: f64) -> Result<Model, ModelError> {
    validate_rate(value)?;
    let am = ActiveModel {
        key: Set(key.to_string()),
        value: Set(value),
        updated_at: Set(Utc::now().into()),
    };
    let stored = Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_must_be_finite_and_non_negative() {
        assert!(validate_rate(-0.5).is_err());
        assert!(validate_rate(f64::NAN).is_err());
        assert!(validate_rate(f64::INFINITY).is_err());
        assert!(validate_rate(0.0).is_ok());
        assert!(validate_rate(62.5).is_ok());
    }
}
