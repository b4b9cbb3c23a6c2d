use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};
use tracing::{info, instrument};

use crate::{
    entities::{
        internal_order::{
            self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
        },
        internal_order_delivery::{self, Entity as DeliveryEntity},
        internal_order_product::{self, Entity as ProductEntity},
        InternalOrderState,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Input for a new internal order product line.
#[derive(Debug, Clone)]
pub struct NewInternalProduct {
    pub sku_id: i32,
    pub description: String,
    pub price: Decimal,
    pub qty: i32,
}

/// A picked physical item recorded on the COMPLETED transition.
#[derive(Debug, Clone)]
pub struct DeliveredItem {
    pub sku_id: i32,
    pub rfid: String,
}

/// An internal order with its product lines and recorded deliveries.
#[derive(Debug, Clone)]
pub struct InternalOrderRecord {
    pub order: OrderModel,
    pub products: Vec<internal_order_product::Model>,
    pub deliveries: Vec<internal_order_delivery::Model>,
}

/// The internal-order lifecycle: the sibling state machine of the restock
/// flow, moving stock out of the warehouse instead of in. Transition order
/// is not enforced here either.
#[derive(Clone)]
pub struct InternalOrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl InternalOrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates an order in ISSUED with its product lines.
    #[instrument(skip(self, products))]
    pub async fn create(
        &self,
        issue_date: String,
        products: Vec<NewInternalProduct>,
        customer_id: i32,
    ) -> Result<i32, ServiceError> {
        let db = &*self.db;

        let order = OrderActiveModel {
            issue_date: Set(issue_date),
            state: Set(InternalOrderState::Issued.to_string()),
            customer_id: Set(customer_id),
            ..Default::default()
        };
        let inserted = order.insert(db).await?;

        for product in products {
            let row = internal_order_product::ActiveModel {
                order_id: Set(inserted.id),
                sku_id: Set(product.sku_id),
                description: Set(product.description),
                price: Set(product.price),
                qty: Set(product.qty),
                ..Default::default()
            };
            row.insert(db).await?;
        }

        info!(order_id = inserted.id, customer_id, "Internal order created");
        self.event_sender
            .send_or_log(Event::InternalOrderCreated(inserted.id))
            .await;

        Ok(inserted.id)
    }

    /// Lists orders, optionally restricted to one state.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        state: Option<InternalOrderState>,
    ) -> Result<Vec<InternalOrderRecord>, ServiceError> {
        let db = &*self.db;

        let mut query = OrderEntity::find();
        if let Some(state) = state {
            query = query.filter(internal_order::Column::State.eq(state.to_string()));
        }
        let orders = query.all(db).await?;

        let mut records = Vec::with_capacity(orders.len());
        for order in orders {
            records.push(self.load_record(order).await?);
        }
        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, order_id: i32) -> Result<Option<InternalOrderRecord>, ServiceError> {
        let db = &*self.db;
        match OrderEntity::find_by_id(order_id).one(db).await? {
            Some(order) => Ok(Some(self.load_record(order).await?)),
            None => Ok(None),
        }
    }

    /// Overwrites the order state; the COMPLETED transition records the
    /// picked RFIDs supplied with it.
    #[instrument(skip(self, deliveries))]
    pub async fn change_state(
        &self,
        order_id: i32,
        new_state: InternalOrderState,
        deliveries: Option<Vec<DeliveredItem>>,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let order = OrderEntity::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("No internal order with matching id".to_string())
            })?;

        let mut active: OrderActiveModel = order.into();
        active.state = Set(new_state.to_string());
        active.update(db).await?;

        if let Some(items) = deliveries {
            for item in items {
                let row = internal_order_delivery::ActiveModel {
                    order_id: Set(order_id),
                    sku_id: Set(item.sku_id),
                    rfid: Set(item.rfid),
                    ..Default::default()
                };
                row.insert(db).await?;
            }
        }

        info!(order_id, state = %new_state, "Internal order state changed");
        self.event_sender
            .send_or_log(Event::InternalOrderStateChanged {
                order_id,
                new_state: new_state.to_string(),
            })
            .await;

        Ok(())
    }

    /// Deletes the order and its lines. Idempotent.
    #[instrument(skip(self))]
    pub async fn delete(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db;

        if let Some(order) = OrderEntity::find_by_id(order_id).one(db).await? {
            DeliveryEntity::delete_many()
                .filter(internal_order_delivery::Column::OrderId.eq(order_id))
                .exec(db)
                .await?;
            ProductEntity::delete_many()
                .filter(internal_order_product::Column::OrderId.eq(order_id))
                .exec(db)
                .await?;
            order.delete(db).await?;
            self.event_sender
                .send_or_log(Event::InternalOrderDeleted(order_id))
                .await;
        }

        Ok(())
    }

    async fn load_record(&self, order: OrderModel) -> Result<InternalOrderRecord, ServiceError> {
        let db = &*self.db;
        let products = ProductEntity::find()
            .filter(internal_order_product::Column::OrderId.eq(order.id))
            .all(db)
            .await?;
        let deliveries = DeliveryEntity::find()
            .filter(internal_order_delivery::Column::OrderId.eq(order.id))
            .all(db)
            .await?;
        Ok(InternalOrderRecord {
            order,
            products,
            deliveries,
        })
    }
}
