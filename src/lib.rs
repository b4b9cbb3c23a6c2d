//! Warehouse API Library
//!
//! Backend for warehouse management: SKUs, RFID-tagged stock instances,
//! storage positions, restock orders, and internal orders.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod validation;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: services::AppServices,
}

/// All /api routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Restock orders
        .route(
            "/restockOrders",
            get(handlers::restock_orders::list_restock_orders),
        )
        .route(
            "/restockOrders/{id}",
            get(handlers::restock_orders::get_restock_order),
        )
        .route(
            "/restockOrders/{id}/returnItems",
            get(handlers::restock_orders::get_return_items),
        )
        .route(
            "/restockOrder",
            post(handlers::restock_orders::create_restock_order),
        )
        .route(
            "/restockOrder/{id}",
            put(handlers::restock_orders::change_restock_order_state)
                .delete(handlers::restock_orders::delete_restock_order),
        )
        .route(
            "/restockOrder/{id}/skuItems",
            put(handlers::restock_orders::attach_sku_items),
        )
        .route(
            "/restockOrder/{id}/transportNote",
            put(handlers::restock_orders::attach_transport_note),
        )
        // SKUs
        .route("/skus", get(handlers::skus::list_skus))
        .route(
            "/skus/{id}",
            get(handlers::skus::get_sku).delete(handlers::skus::delete_sku),
        )
        .route("/sku", post(handlers::skus::create_sku))
        .route("/sku/{id}", put(handlers::skus::modify_sku))
        .route(
            "/sku/{id}/position",
            put(handlers::skus::assign_sku_position),
        )
        // SKU items
        .route("/skuitems", get(handlers::sku_items::list_sku_items))
        .route(
            "/skuitems/sku/{id}",
            get(handlers::sku_items::list_sku_items_by_sku),
        )
        .route(
            "/skuitems/{rfid}",
            get(handlers::sku_items::get_sku_item)
                .put(handlers::sku_items::modify_sku_item)
                .delete(handlers::sku_items::delete_sku_item),
        )
        .route("/skuitem", post(handlers::sku_items::create_sku_item))
        // Positions
        .route("/positions", get(handlers::positions::list_positions))
        .route("/position", post(handlers::positions::create_position))
        .route(
            "/position/{position_id}",
            put(handlers::positions::modify_position)
                .delete(handlers::positions::delete_position),
        )
        .route(
            "/position/{position_id}/changeID",
            put(handlers::positions::change_position_id),
        )
        // Internal orders
        .route(
            "/internalOrders",
            get(handlers::internal_orders::list_internal_orders)
                .post(handlers::internal_orders::create_internal_order),
        )
        .route(
            "/internalOrders/{id}",
            get(handlers::internal_orders::get_internal_order)
                .put(handlers::internal_orders::change_internal_order_state)
                .delete(handlers::internal_orders::delete_internal_order),
        )
        // Suppliers
        .route("/suppliers", get(handlers::suppliers::list_suppliers))
        .route("/supplier", post(handlers::suppliers::create_supplier))
}

pub async fn api_status() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    Json(json!({
        "status": "ok",
        "version": version,
        "service": "warehouse-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    }))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Json(json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
