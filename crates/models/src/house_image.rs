use std::collections::HashMap;

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::house;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "house_image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub house_id: i32,
    pub filename: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::house::Entity",
        from = "Column::HouseId",
        to = "super::house::Column::Id",
        on_delete = "Cascade"
    )]
    House,
}

impl Related<house::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::House.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Append filenames after the current last position, keeping their order.
pub async fn append<C: ConnectionTrait>(
    db: &C,
    house_id: i32,
    filenames: &[String],
) -> Result<Vec<Model>, ModelError> {
    if filenames.is_empty() {
        return Ok(Vec::new());
    }
    let last: Option<i32> = Entity::find()
        .select_only()
        .column_as(Column::Position.max(), "max_position")
        .filter(Column::HouseId.eq(house_id))
        .into_tuple::<Option<i32>>()
        .one(db)
        .await
        .map_err(ModelError::db)?
        .flatten();
    let mut next = last.map_or(0, |p| p + 1);

    let mut created = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let am = ActiveModel {
            house_id: Set(house_id),
            filename: Set(filename.clone()),
            position: Set(next),
            ..Default::default()
        };
        created.push(am.insert(db).await.map_err(ModelError::db)?);
        next += 1;
    }
    Ok(created)
}

/// Gallery filenames of one house, oldest first.
pub async fn filenames_for<C: ConnectionTrait>(db: &C, house_id: i32) -> Result<Vec<String>, ModelError> {
    let rows = Entity::find()
        .filter(Column::HouseId.eq(house_id))
        .order_by_asc(Column::Position)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::db)?;
    Ok(rows.into_iter().map(|r| r.filename).collect())
}

/// Galleries of many houses in one query, keyed by house id. Houses without
/// images have no entry.
pub async fn filenames_by_house<C: ConnectionTrait>(
    db: &C,
    house_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>, ModelError> {
    let mut galleries: HashMap<i32, Vec<String>> = HashMap::new();
    if house_ids.is_empty() {
        return Ok(galleries);
    }
    let rows = Entity::find()
        .filter(Column::HouseId.is_in(house_ids.iter().copied()))
        .order_by_asc(Column::HouseId)
        .order_by_asc(Column::Position)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::db)?;
    for row in rows {
        galleries.entry(row.house_id).or_default().push(row.filename);
    }
    Ok(galleries)
}
