use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter,
};
use tracing::{info, instrument};

use crate::{
    entities::{
        restock_order::{
            self, ActiveModel as OrderActiveModel, Entity as OrderEntity, Model as OrderModel,
        },
        restock_order_product::{self, Entity as ProductEntity},
        restock_order_sku_item::{self, Entity as OrderSkuItemEntity},
        supplier::Entity as SupplierEntity,
        RestockOrderState,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    validation::parse_warehouse_date,
};

/// Input for a new restock order product line.
#[derive(Debug, Clone)]
pub struct NewOrderProduct {
    pub sku_id: i32,
    pub item_id: Option<i32>,
    pub description: String,
    pub price: Decimal,
    pub qty: i32,
}

/// Input for one received SKU instance (from delivery registration or the
/// COMPLETED transition).
#[derive(Debug, Clone)]
pub struct ReceivedSkuItem {
    pub sku_id: i32,
    pub item_id: Option<i32>,
    pub rfid: String,
}

/// A restock order with its product lines and received instances.
#[derive(Debug, Clone)]
pub struct RestockOrderRecord {
    pub order: OrderModel,
    pub products: Vec<restock_order_product::Model>,
    pub sku_items: Vec<restock_order_sku_item::Model>,
}

/// Owns the restock-order lifecycle: creation in ISSUED, state overwrites,
/// state-gated sub-resource attachment, and the return-item read over
/// COMPLETEDRETURN orders.
#[derive(Clone)]
pub struct RestockOrderService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl RestockOrderService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates an order in ISSUED with its product lines and no received
    /// items. The supplier reference is checked first; a dangling supplier
    /// id aborts the insert.
    #[instrument(skip(self, products))]
    pub async fn create(
        &self,
        issue_date: String,
        products: Vec<NewOrderProduct>,
        supplier_id: i32,
    ) -> Result<i32, ServiceError> {
        let db = &*self.db;

        let supplier = SupplierEntity::find_by_id(supplier_id).one(db).await?;
        if supplier.is_none() {
            return Err(ServiceError::DependencyViolation(
                "Supplier not found. Operation aborted.".to_string(),
            ));
        }

        let order = OrderActiveModel {
            issue_date: Set(issue_date),
            state: Set(RestockOrderState::Issued.to_string()),
            supplier_id: Set(supplier_id),
            transport_note_delivery_date: Set(None),
            ..Default::default()
        };
        let inserted = order.insert(db).await?;

        for product in products {
            let row = restock_order_product::ActiveModel {
                order_id: Set(inserted.id),
                sku_id: Set(product.sku_id),
                item_id: Set(product.item_id),
                description: Set(product.description),
                price: Set(product.price),
                qty: Set(product.qty),
                ..Default::default()
            };
            row.insert(db).await?;
        }

        info!(order_id = inserted.id, supplier_id, "Restock order created");
        self.event_sender
            .send_or_log(Event::RestockOrderCreated(inserted.id))
            .await;

        Ok(inserted.id)
    }

    /// Lists orders, optionally restricted to one state.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        state: Option<RestockOrderState>,
    ) -> Result<Vec<RestockOrderRecord>, ServiceError> {
        let db = &*self.db;

        let mut query = OrderEntity::find();
        if let Some(state) = state {
            query = query.filter(restock_order::Column::State.eq(state.to_string()));
        }
        let orders = query.all(db).await?;

        let mut records = Vec::with_capacity(orders.len());
        for order in orders {
            records.push(self.load_record(order).await?);
        }
        Ok(records)
    }

    /// Fetches one order with its lines, or None.
    #[instrument(skip(self))]
    pub async fn get(&self, order_id: i32) -> Result<Option<RestockOrderRecord>, ServiceError> {
        let db = &*self.db;
        match OrderEntity::find_by_id(order_id).one(db).await? {
            Some(order) => Ok(Some(self.load_record(order).await?)),
            None => Ok(None),
        }
    }

    /// Reads the order's current state token.
    async fn current_state(
        &self,
        order_id: i32,
    ) -> Result<Option<RestockOrderState>, ServiceError> {
        let db = &*self.db;
        let order = OrderEntity::find_by_id(order_id).one(db).await?;
        match order {
            None => Ok(None),
            Some(order) => {
                let state = RestockOrderState::parse(&order.state).ok_or_else(|| {
                    ServiceError::InternalError(format!(
                        "Order {} carries unknown state token '{}'",
                        order_id, order.state
                    ))
                })?;
                Ok(Some(state))
            }
        }
    }

    /// Overwrites the order state. Any recognized token is accepted from any
    /// state; only the row's existence is checked. When the COMPLETED
    /// transition supplies received instances they are recorded alongside.
    #[instrument(skip(self, received))]
    pub async fn change_state(
        &self,
        order_id: i32,
        new_state: RestockOrderState,
        received: Option<Vec<ReceivedSkuItem>>,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let order = OrderEntity::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("No restock order with matching id".to_string())
            })?;

        let mut active: OrderActiveModel = order.into();
        active.state = Set(new_state.to_string());
        active.update(db).await?;

        if let Some(items) = received {
            self.insert_received(order_id, &items).await?;
        }

        info!(order_id, state = %new_state, "Restock order state changed");
        self.event_sender
            .send_or_log(Event::RestockOrderStateChanged {
                order_id,
                new_state: new_state.to_string(),
            })
            .await;

        Ok(())
    }

    /// Records delivered SKU instances. Only legal while the order sits in
    /// DELIVERED; an absent order reads as NotFound, any other state as
    /// InvalidState.
    #[instrument(skip(self, items))]
    pub async fn attach_sku_items(
        &self,
        order_id: i32,
        items: Vec<ReceivedSkuItem>,
    ) -> Result<(), ServiceError> {
        match self.current_state(order_id).await? {
            None => Err(ServiceError::NotFound(
                "No restock order with matching id".to_string(),
            )),
            Some(RestockOrderState::Delivered) => {
                let count = items.len();
                self.insert_received(order_id, &items).await?;
                self.event_sender
                    .send_or_log(Event::RestockOrderItemsRecorded { order_id, count })
                    .await;
                Ok(())
            }
            Some(_) => Err(ServiceError::InvalidState(
                "Order status is not DELIVERED.".to_string(),
            )),
        }
    }

    /// Attaches the transport note. The delivery date may never precede the
    /// issue date, and the order must currently be in DELIVERY. Check order
    /// matches the API contract: existence, then date comparison, then the
    /// state gate.
    #[instrument(skip(self))]
    pub async fn attach_transport_note(
        &self,
        order_id: i32,
        delivery_date: String,
    ) -> Result<(), ServiceError> {
        let db = &*self.db;

        let order = OrderEntity::find_by_id(order_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound("No restock order with matching id".to_string())
            })?;

        let issued = parse_warehouse_date(&order.issue_date).ok_or_else(|| {
            ServiceError::InternalError(format!(
                "Order {} carries unparseable issue date '{}'",
                order_id, order.issue_date
            ))
        })?;
        let delivery = parse_warehouse_date(&delivery_date).ok_or_else(|| {
            ServiceError::ValidationError("Invalid transport note data.".to_string())
        })?;
        if issued > delivery {
            return Err(ServiceError::ValidationError(
                "Delivery Date Before Issue Date.".to_string(),
            ));
        }

        let state = RestockOrderState::parse(&order.state);
        if state != Some(RestockOrderState::Delivery) {
            return Err(ServiceError::InvalidState(
                "Order status is not DELIVERY.".to_string(),
            ));
        }

        let mut active: OrderActiveModel = order.into();
        active.transport_note_delivery_date = Set(Some(delivery_date.clone()));
        active.update(db).await?;

        self.event_sender
            .send_or_log(Event::TransportNoteAttached {
                order_id,
                delivery_date,
            })
            .await;

        Ok(())
    }

    /// Deletes the order. Idempotent: deleting an absent id is a no-op.
    /// Product lines and received instances go with it (cascade).
    #[instrument(skip(self))]
    pub async fn delete(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db;

        if let Some(order) = OrderEntity::find_by_id(order_id).one(db).await? {
            // SQLite ships with foreign_keys off by default, so clear the
            // dependent rows explicitly rather than leaning on the cascade.
            OrderSkuItemEntity::delete_many()
                .filter(restock_order_sku_item::Column::OrderId.eq(order_id))
                .exec(db)
                .await?;
            ProductEntity::delete_many()
                .filter(restock_order_product::Column::OrderId.eq(order_id))
                .exec(db)
                .await?;
            order.delete(db).await?;
            self.event_sender
                .send_or_log(Event::RestockOrderDeleted(order_id))
                .await;
        }

        Ok(())
    }

    /// The return-item read: the received instances of a COMPLETEDRETURN
    /// order. Absent order → NotFound, any other state → InvalidState.
    #[instrument(skip(self))]
    pub async fn return_items(
        &self,
        order_id: i32,
    ) -> Result<Vec<restock_order_sku_item::Model>, ServiceError> {
        match self.current_state(order_id).await? {
            None => Err(ServiceError::NotFound(
                "No restock order with matching id".to_string(),
            )),
            Some(RestockOrderState::CompletedReturn) => {
                let db = &*self.db;
                let items = OrderSkuItemEntity::find()
                    .filter(restock_order_sku_item::Column::OrderId.eq(order_id))
                    .all(db)
                    .await?;
                Ok(items)
            }
            Some(_) => Err(ServiceError::InvalidState(
                "Order status is not COMPLETEDRETURN.".to_string(),
            )),
        }
    }

    async fn insert_received(
        &self,
        order_id: i32,
        items: &[ReceivedSkuItem],
    ) -> Result<(), ServiceError> {
        let db = &*self.db;
        for item in items {
            let row = restock_order_sku_item::ActiveModel {
                order_id: Set(order_id),
                sku_id: Set(item.sku_id),
                item_id: Set(item.item_id),
                rfid: Set(item.rfid.clone()),
                ..Default::default()
            };
            row.insert(db).await?;
        }
        Ok(())
    }

    async fn load_record(&self, order: OrderModel) -> Result<RestockOrderRecord, ServiceError> {
        let db = &*self.db;
        let products = ProductEntity::find()
            .filter(restock_order_product::Column::OrderId.eq(order.id))
            .all(db)
            .await?;
        let sku_items = OrderSkuItemEntity::find()
            .filter(restock_order_sku_item::Column::OrderId.eq(order.id))
            .all(db)
            .await?;
        Ok(RestockOrderRecord {
            order,
            products,
            sku_items,
        })
    }
}
