use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical storage slot. The public identifier is the 12-digit
/// `position_id` (aisle + row + column, 4 digits each); `id` is the internal
/// surrogate key SKUs reference.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "positions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub position_id: String,
    pub aisle: String,
    pub row: String,
    pub col: String,
    pub max_weight: i32,
    pub max_volume: i32,
    pub occupied_weight: i32,
    pub occupied_volume: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sku::Entity")]
    Skus,
}

impl Related<super::sku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Skus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
