use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A physical RFID-tagged instance recorded against a restock order once
/// the goods arrive.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restock_order_sku_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub sku_id: i32,
    pub item_id: Option<i32>,
    pub rfid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::restock_order::Entity",
        from = "Column::OrderId",
        to = "super::restock_order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::restock_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
