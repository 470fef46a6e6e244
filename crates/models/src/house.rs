use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::house_image;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "house")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    /// Primary image filename inside the upload directory.
    pub image_file: Option<String>,
    pub available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::house_image::Entity")]
    Images,
}

impl Related<house_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Scalar columns written by create and edit.
#[derive(Clone, Debug, PartialEq)]
pub struct HouseColumns {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    cols: HouseColumns,
    image_file: Option<String>,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        title: Set(cols.title),
        description: Set(cols.description),
        price: Set(cols.price),
        location: Set(cols.location),
        contact_name: Set(cols.contact_name),
        contact_phone: Set(cols.contact_phone),
        image_file: Set(image_file),
        available: Set(true),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::db)
}

/// Overwrite every scalar column; the primary image changes only when `image_file` is `Some`.
pub async fn overwrite<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    cols: HouseColumns,
    available: bool,
    image_file: Option<String>,
) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.title = Set(cols.title);
    am.description = Set(cols.description);
    am.price = Set(cols.price);
    am.location = Set(cols.location);
    am.contact_name = Set(cols.contact_name);
    am.contact_phone = Set(cols.contact_phone);
    am.available = Set(available);
    if let Some(name) = image_file {
        am.image_file = Set(Some(name));
    }
    am.update(db).await.map_err(ModelError::db)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(ModelError::db)
}

/// All listings in insertion order.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::db)
}
