pub mod internal_orders;
pub mod positions;
pub mod restock_orders;
pub mod sku_items;
pub mod skus;
pub mod suppliers;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::events::EventSender;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub restock_orders: Arc<restock_orders::RestockOrderService>,
    pub internal_orders: Arc<internal_orders::InternalOrderService>,
    pub skus: Arc<skus::SkuService>,
    pub sku_items: Arc<sku_items::SkuItemService>,
    pub positions: Arc<positions::PositionService>,
    pub suppliers: Arc<suppliers::SupplierService>,
}

impl AppServices {
    /// Builds the service container over one shared connection pool and
    /// event channel.
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        let restock_orders = Arc::new(restock_orders::RestockOrderService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let internal_orders = Arc::new(internal_orders::InternalOrderService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let skus = Arc::new(skus::SkuService::new(db.clone(), event_sender.clone()));
        let sku_items = Arc::new(sku_items::SkuItemService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let positions = Arc::new(positions::PositionService::new(db.clone(), event_sender));
        let suppliers = Arc::new(suppliers::SupplierService::new(db));

        Self {
            restock_orders,
            internal_orders,
            skus,
            sku_items,
            positions,
            suppliers,
        }
    }
}
