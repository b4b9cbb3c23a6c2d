use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter as StrumEnumIter, EnumString};
use utoipa::ToSchema;

/// Lifecycle states of an internal order. ISSUED orders are accepted or
/// refused; accepted orders complete once the picked RFIDs are recorded.
/// As with restock orders, transition order is not enforced.
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
pub enum InternalOrderState {
    Issued,
    Accepted,
    Refused,
    Canceled,
    Completed,
}

impl InternalOrderState {
    /// Parses a state token, trimming surrounding whitespace and ignoring
    /// case.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "internal_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub issue_date: String,
    pub state: String,
    pub customer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::internal_order_product::Entity")]
    Products,
    #[sea_orm(has_many = "super::internal_order_delivery::Entity")]
    Deliveries,
}

impl Related<super::internal_order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::internal_order_delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_tokens() {
        assert_eq!(
            InternalOrderState::parse(" accepted "),
            Some(InternalOrderState::Accepted)
        );
        assert_eq!(
            InternalOrderState::parse("CANCELED"),
            Some(InternalOrderState::Canceled)
        );
        assert_eq!(InternalOrderState::parse("DELIVERY"), None);
    }
}
