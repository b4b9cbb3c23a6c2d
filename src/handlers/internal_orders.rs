use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::common::{created_response, no_content_response, ok_response, success_response};
use crate::{
    entities::InternalOrderState,
    errors::ServiceError,
    services::internal_orders::{DeliveredItem, InternalOrderRecord, NewInternalProduct},
    validation::{date_is_valid, rfid_is_valid},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInternalOrderRequest {
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    pub products: Vec<InternalProductRequest>,
    #[serde(rename = "customerId")]
    pub customer_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InternalProductRequest {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    pub description: String,
    pub price: Decimal,
    pub qty: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeInternalStateRequest {
    #[serde(rename = "newState")]
    pub new_state: String,
    /// Required on the COMPLETED transition: the picked instances.
    #[serde(default)]
    pub products: Vec<DeliveredItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeliveredItemRequest {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "RFID")]
    pub rfid: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InternalOrderListQuery {
    /// Optional state filter (case-insensitive token)
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternalOrderResponse {
    pub id: i32,
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    pub state: String,
    pub products: Vec<serde_json::Value>,
    #[serde(rename = "customerId")]
    pub customer_id: i32,
    #[serde(rename = "deliveredItems", skip_serializing_if = "Vec::is_empty")]
    pub delivered_items: Vec<serde_json::Value>,
}

impl From<InternalOrderRecord> for InternalOrderResponse {
    fn from(record: InternalOrderRecord) -> Self {
        Self {
            id: record.order.id,
            issue_date: record.order.issue_date,
            state: record.order.state,
            customer_id: record.order.customer_id,
            products: record
                .products
                .into_iter()
                .map(|p| {
                    json!({
                        "SKUId": p.sku_id,
                        "description": p.description,
                        "price": p.price,
                        "qty": p.qty,
                    })
                })
                .collect(),
            delivered_items: record
                .deliveries
                .into_iter()
                .map(|d| json!({ "SKUId": d.sku_id, "RFID": d.rfid }))
                .collect(),
        }
    }
}

fn parse_state_filter(raw: Option<&str>) -> Result<Option<InternalOrderState>, ServiceError> {
    match raw {
        None => Ok(None),
        Some(token) => InternalOrderState::parse(token)
            .map(Some)
            .ok_or_else(|| ServiceError::ValidationError("Invalid internal order state.".to_string())),
    }
}

/// List internal orders, optionally filtered by state
pub async fn list_internal_orders(
    State(state): State<AppState>,
    Query(query): Query<InternalOrderListQuery>,
) -> Result<Response, ServiceError> {
    let filter = parse_state_filter(query.state.as_deref())?;
    let records = state.services.internal_orders.list(filter).await?;
    let orders: Vec<InternalOrderResponse> = records
        .into_iter()
        .map(InternalOrderResponse::from)
        .collect();
    Ok(success_response(orders))
}

/// Fetch one internal order
pub async fn get_internal_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if id < 0 {
        return Err(ServiceError::ValidationError(
            "Invalid internal order id.".to_string(),
        ));
    }
    match state.services.internal_orders.get(id).await? {
        Some(record) => Ok(success_response(InternalOrderResponse::from(record))),
        None => Err(ServiceError::NotFound(
            "No internal order with matching id".to_string(),
        )),
    }
}

/// Create an internal order (state ISSUED)
pub async fn create_internal_order(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateInternalOrderRequest>,
) -> Result<Response, ServiceError> {
    let malformed = payload
        .products
        .iter()
        .any(|p| p.sku_id <= 0 || p.price <= Decimal::ZERO || p.qty < 0);
    if !date_is_valid(&payload.issue_date) || malformed {
        return Err(ServiceError::ValidationError(
            "Invalid internal order data.".to_string(),
        ));
    }

    let products = payload
        .products
        .into_iter()
        .map(|p| NewInternalProduct {
            sku_id: p.sku_id,
            description: p.description,
            price: p.price,
            qty: p.qty,
        })
        .collect();

    let id = state
        .services
        .internal_orders
        .create(payload.issue_date, products, payload.customer_id)
        .await?;

    Ok(created_response(json!({ "id": id })))
}

/// Overwrite the order state (COMPLETED records the picked RFIDs)
pub async fn change_internal_order_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<ChangeInternalStateRequest>,
) -> Result<Response, ServiceError> {
    let new_state = InternalOrderState::parse(&payload.new_state)
        .ok_or_else(|| ServiceError::ValidationError("Invalid item data.".to_string()))?;

    let deliveries = if new_state == InternalOrderState::Completed {
        if payload.products.is_empty()
            || payload
                .products
                .iter()
                .any(|p| p.sku_id <= 0 || !rfid_is_valid(&p.rfid))
        {
            return Err(ServiceError::ValidationError(
                "Invalid item data.".to_string(),
            ));
        }
        Some(
            payload
                .products
                .into_iter()
                .map(|p| DeliveredItem {
                    sku_id: p.sku_id,
                    rfid: p.rfid,
                })
                .collect(),
        )
    } else {
        None
    };

    state
        .services
        .internal_orders
        .change_state(id, new_state, deliveries)
        .await?;

    Ok(ok_response())
}

/// Delete an internal order (idempotent)
pub async fn delete_internal_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if id < 0 {
        return Err(ServiceError::ValidationError(
            "Validation of id failed".to_string(),
        ));
    }
    state.services.internal_orders.delete(id).await?;
    Ok(no_content_response())
}
