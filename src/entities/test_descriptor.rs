use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quality-test descriptor attached to a SKU. Only the id list is surfaced
/// on the SKU read model; the descriptors also block SKU deletion.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_descriptors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub procedure_description: String,
    pub id_sku: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sku::Entity",
        from = "Column::IdSku",
        to = "super::sku::Column::Id",
        on_delete = "Cascade"
    )]
    Sku,
}

impl Related<super::sku::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sku.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
