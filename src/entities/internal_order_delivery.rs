use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An RFID recorded when an internal order completes: which physical items
/// fulfilled the order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "internal_order_deliveries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub sku_id: i32,
    pub rfid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::internal_order::Entity",
        from = "Column::OrderId",
        to = "super::internal_order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::internal_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
