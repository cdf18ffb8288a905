use sea_orm::{entity::prelude::*, sea_query::Expr, Condition, DatabaseConnection, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const NAME_MAX_LEN: usize = 128;
pub const ADDRESS_MAX_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Result of a name/address update, mirroring matched-vs-modified counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    NotFound,
    Unchanged,
    Updated,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name longer than {NAME_MAX_LEN} chars")));
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), ModelError> {
    if address.chars().count() > ADDRESS_MAX_LEN {
        return Err(ModelError::Validation(format!("address longer than {ADDRESS_MAX_LEN} chars")));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str, address: &str) -> Result<Model, ModelError> {
    validate_name(name)?;
    validate_address(address)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        address: Set(address.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::CreatedAt).all(db).await?)
}

/// Set name and address in one statement; rows whose values already match are
/// not touched, so zero affected rows means either missing or unchanged.
pub async fn update_details(db: &DatabaseConnection, id: Uuid, name: &str, address: &str) -> Result<UpdateOutcome, ModelError> {
    validate_name(name)?;
    validate_address(address)?;
    let name = name.trim();
    let address = address.trim();
    let res = Entity::update_many()
        .col_expr(Column::Name, Expr::value(name.to_string()))
        .col_expr(Column::Address, Expr::value(address.to_string()))
        .filter(Column::Id.eq(id))
        .filter(
            Condition::any()
                .add(Column::Name.ne(name.to_string()))
                .add(Column::Address.ne(address.to_string())),
        )
        .exec(db)
        .await?;
    if res.rows_affected > 0 {
        return Ok(UpdateOutcome::Updated);
    }
    match Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(UpdateOutcome::Unchanged),
        None => Ok(UpdateOutcome::NotFound),
    }
}

/// Delete by id; returns the number of removed rows (0 or 1).
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(validate_name("   "), Err(ModelError::Validation(_))));
        assert!(validate_name("Rahim").is_ok());
    }

    #[test]
    fn overlong_fields_are_rejected() {
        assert!(validate_name(&"x".repeat(NAME_MAX_LEN + 1)).is_err());
        assert!(validate_address(&"x".repeat(ADDRESS_MAX_LEN + 1)).is_err());
        assert!(validate_address("").is_ok());
    }
}
