use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An individually RFID-tagged physical unit of a SKU. Instances start out
/// unavailable and are flipped once stocked and tested.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sku_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub rfid: String,
    pub sku_id: i32,
    pub available: bool,
    pub date_of_stock: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sku::Entity",
        from = "Column::SkuId",
        to = "super::sku::Column::Id"
    )]
    Sku,
}

impl Related<super::sku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sku.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
