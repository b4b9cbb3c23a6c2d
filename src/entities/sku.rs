use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A stock-keeping unit: the catalog entry for a product type. Weight and
/// volume are per-item figures; while `position_id` is set, that position's
/// occupied figures must equal `available_quantity` times weight/volume.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub weight: i32,
    pub volume: i32,
    pub notes: Option<String>,
    pub price: Decimal,
    pub available_quantity: i32,
    pub position_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::position::Entity",
        from = "Column::PositionId",
        to = "super::position::Column::Id"
    )]
    Position,
    #[sea_orm(has_many = "super::sku_item::Entity")]
    SkuItems,
    #[sea_orm(has_many = "super::test_descriptor::Entity")]
    TestDescriptors,
}

impl Related<super::position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<super::sku_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SkuItems.def()
    }
}

impl Related<super::test_descriptor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestDescriptors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
