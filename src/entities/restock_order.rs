use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter as StrumEnumIter, EnumString};
use utoipa::ToSchema;

/// Lifecycle states of a restock order.
///
/// Nominal forward order is ISSUED → DELIVERY → DELIVERED → TESTED →
/// COMPLETED, with COMPLETEDRETURN as the alternate terminal reached from
/// TESTED. Transition order is not enforced: any recognized token can be
/// written from any state, matching the documented API contract.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    StrumEnumIter,
    ToSchema,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestockOrderState {
    Issued,
    Delivery,
    Delivered,
    Tested,
    CompletedReturn,
    Completed,
}

impl RestockOrderState {
    /// Parses a state token, trimming surrounding whitespace and ignoring
    /// case. All transition routes share this single parse path.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restock_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub issue_date: String,
    pub state: String,
    pub supplier_id: i32,
    pub transport_note_delivery_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::restock_order_product::Entity")]
    Products,
    #[sea_orm(has_many = "super::restock_order_sku_item::Entity")]
    SkuItems,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::restock_order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::restock_order_sku_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SkuItems.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_all_six_tokens() {
        assert_eq!(
            RestockOrderState::parse("ISSUED"),
            Some(RestockOrderState::Issued)
        );
        assert_eq!(
            RestockOrderState::parse("DELIVERY"),
            Some(RestockOrderState::Delivery)
        );
        assert_eq!(
            RestockOrderState::parse("DELIVERED"),
            Some(RestockOrderState::Delivered)
        );
        assert_eq!(
            RestockOrderState::parse("TESTED"),
            Some(RestockOrderState::Tested)
        );
        assert_eq!(
            RestockOrderState::parse("COMPLETEDRETURN"),
            Some(RestockOrderState::CompletedReturn)
        );
        assert_eq!(
            RestockOrderState::parse("COMPLETED"),
            Some(RestockOrderState::Completed)
        );
    }

    #[test]
    fn parse_trims_and_ignores_case() {
        assert_eq!(
            RestockOrderState::parse("  delivered "),
            Some(RestockOrderState::Delivered)
        );
        assert_eq!(
            RestockOrderState::parse("completedReturn"),
            Some(RestockOrderState::CompletedReturn)
        );
        assert_eq!(RestockOrderState::parse("SHIPPED"), None);
        assert_eq!(RestockOrderState::parse(""), None);
    }

    #[test]
    fn display_matches_stored_tokens() {
        assert_eq!(RestockOrderState::Issued.to_string(), "ISSUED");
        assert_eq!(
            RestockOrderState::CompletedReturn.to_string(),
            "COMPLETEDRETURN"
        );
    }
}
