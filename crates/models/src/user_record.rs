use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[serde(rename = "pickedUp")]
    pub picked_up: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a record; the id is assigned by storage and `picked_up` starts false.
pub async fn create(db: &DatabaseConnection, name: &str, address: &str, phone: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        name: Set(name.to_string()),
        address: Set(address.to_string()),
        phone: Set(phone.to_string()),
        picked_up: Set(false),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

/// Flip the pickup flag to true. Returns `None` when no record has `id`.
pub async fn mark_picked_up(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.picked_up = Set(true);
    Ok(Some(am.update(db).await?))
}
