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
    entities::RestockOrderState,
    errors::ServiceError,
    services::restock_orders::{NewOrderProduct, ReceivedSkuItem, RestockOrderRecord},
    validation::{date_format_is_valid, date_is_valid, rfid_is_valid},
    AppState,
};

// Request and response DTOs. Field names mirror the wire format of the
// warehouse API (SKUId, issueDate, ...).

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestockOrderRequest {
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    pub products: Vec<OrderProductRequest>,
    #[serde(rename = "supplierId")]
    pub supplier_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderProductRequest {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "itemId", default)]
    pub item_id: Option<i32>,
    pub description: String,
    pub price: Decimal,
    pub qty: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeStateRequest {
    #[serde(rename = "newState")]
    pub new_state: String,
    /// Required on the COMPLETED transition: the received instances.
    #[serde(default)]
    pub products: Vec<CompletedProductRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompletedProductRequest {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "RFID")]
    pub rfid: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachSkuItemsRequest {
    #[serde(rename = "skuItems")]
    pub sku_items: Vec<SkuItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SkuItemRequest {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "itemId")]
    pub item_id: i32,
    pub rfid: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachTransportNoteRequest {
    #[serde(rename = "transportNote")]
    pub transport_note: TransportNote,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TransportNote {
    #[serde(rename = "deliveryDate")]
    pub delivery_date: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RestockOrderListQuery {
    /// Optional state filter (case-insensitive token)
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestockOrderResponse {
    pub id: i32,
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    pub state: String,
    pub products: Vec<OrderProductResponse>,
    #[serde(rename = "supplierId")]
    pub supplier_id: i32,
    #[serde(rename = "transportNote", skip_serializing_if = "Option::is_none")]
    pub transport_note: Option<TransportNote>,
    #[serde(rename = "skuItems")]
    pub sku_items: Vec<OrderSkuItemResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderProductResponse {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "itemId", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i32>,
    pub description: String,
    pub price: Decimal,
    pub qty: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSkuItemResponse {
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "itemId", skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i32>,
    pub rfid: String,
}

impl From<RestockOrderRecord> for RestockOrderResponse {
    fn from(record: RestockOrderRecord) -> Self {
        Self {
            id: record.order.id,
            issue_date: record.order.issue_date,
            state: record.order.state,
            supplier_id: record.order.supplier_id,
            transport_note: record
                .order
                .transport_note_delivery_date
                .map(|delivery_date| TransportNote { delivery_date }),
            products: record
                .products
                .into_iter()
                .map(|p| OrderProductResponse {
                    sku_id: p.sku_id,
                    item_id: p.item_id,
                    description: p.description,
                    price: p.price,
                    qty: p.qty,
                })
                .collect(),
            sku_items: record
                .sku_items
                .into_iter()
                .map(|i| OrderSkuItemResponse {
                    sku_id: i.sku_id,
                    item_id: i.item_id,
                    rfid: i.rfid,
                })
                .collect(),
        }
    }
}

fn validate_order_id(id: i32) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::ValidationError(
            "Invalid restock order id.".to_string(),
        ));
    }
    Ok(())
}

fn parse_state_filter(raw: Option<&str>) -> Result<Option<RestockOrderState>, ServiceError> {
    match raw {
        None => Ok(None),
        Some(token) => RestockOrderState::parse(token)
            .map(Some)
            .ok_or_else(|| ServiceError::ValidationError("Invalid restock order state.".to_string())),
    }
}

// Handler functions

/// List restock orders, optionally filtered by state
#[utoipa::path(
    get,
    path = "/api/restockOrders",
    params(("state" = Option<String>, Query, description = "State filter")),
    responses(
        (status = 200, description = "Restock orders", body = [RestockOrderResponse]),
        (status = 422, description = "Unrecognized state token", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn list_restock_orders(
    State(state): State<AppState>,
    Query(query): Query<RestockOrderListQuery>,
) -> Result<Response, ServiceError> {
    let filter = parse_state_filter(query.state.as_deref())?;
    let records = state.services.restock_orders.list(filter).await?;
    let orders: Vec<RestockOrderResponse> =
        records.into_iter().map(RestockOrderResponse::from).collect();
    Ok(success_response(orders))
}

/// Fetch one restock order
#[utoipa::path(
    get,
    path = "/api/restockOrders/{id}",
    params(("id" = i32, Path, description = "Restock order id")),
    responses(
        (status = 200, description = "Restock order", body = RestockOrderResponse),
        (status = 404, description = "No such order", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid id", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn get_restock_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;
    match state.services.restock_orders.get(id).await? {
        Some(record) => Ok(success_response(RestockOrderResponse::from(record))),
        None => Err(ServiceError::NotFound(
            "No restock order with matching id".to_string(),
        )),
    }
}

/// List the return items of a COMPLETEDRETURN order
#[utoipa::path(
    get,
    path = "/api/restockOrders/{id}/returnItems",
    params(("id" = i32, Path, description = "Restock order id")),
    responses(
        (status = 200, description = "Return items", body = [OrderSkuItemResponse]),
        (status = 404, description = "No such order", body = crate::errors::ErrorResponse),
        (status = 422, description = "Order is not COMPLETEDRETURN", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn get_return_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;
    let items = state.services.restock_orders.return_items(id).await?;
    let items: Vec<serde_json::Value> = items
        .into_iter()
        .map(|i| json!({ "SKUId": i.sku_id, "rfid": i.rfid }))
        .collect();
    Ok(success_response(items))
}

/// Create a restock order (state ISSUED)
#[utoipa::path(
    post,
    path = "/api/restockOrder",
    request_body = CreateRestockOrderRequest,
    responses(
        (status = 201, description = "Order created"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid order data", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn create_restock_order(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateRestockOrderRequest>,
) -> Result<Response, ServiceError> {
    if !date_is_valid(&payload.issue_date) {
        return Err(ServiceError::ValidationError(
            "Invalid restock order data.".to_string(),
        ));
    }
    if payload.supplier_id <= 0 {
        return Err(ServiceError::ValidationError(
            "Invalid restock order data.".to_string(),
        ));
    }
    let malformed = payload.products.iter().any(|p| {
        p.sku_id <= 0
            || p.item_id.is_some_and(|item_id| item_id <= 0)
            || p.price <= Decimal::ZERO
            || p.qty < 0
    });
    if malformed {
        return Err(ServiceError::ValidationError(
            "Invalid restock order data.".to_string(),
        ));
    }

    let products = payload
        .products
        .into_iter()
        .map(|p| NewOrderProduct {
            sku_id: p.sku_id,
            item_id: p.item_id,
            description: p.description,
            price: p.price,
            qty: p.qty,
        })
        .collect();

    let id = state
        .services
        .restock_orders
        .create(payload.issue_date, products, payload.supplier_id)
        .await?;

    Ok(created_response(json!({ "id": id })))
}

/// Overwrite the order state (COMPLETED requires received instances)
#[utoipa::path(
    put,
    path = "/api/restockOrder/{id}",
    params(("id" = i32, Path, description = "Restock order id")),
    request_body = ChangeStateRequest,
    responses(
        (status = 200, description = "State updated"),
        (status = 404, description = "No such order", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid state or items", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn change_restock_order_state(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<ChangeStateRequest>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;

    let new_state = RestockOrderState::parse(&payload.new_state).ok_or_else(|| {
        ServiceError::ValidationError("Invalid restock order data.".to_string())
    })?;

    let received = if new_state == RestockOrderState::Completed {
        if payload.products.is_empty()
            || payload
                .products
                .iter()
                .any(|p| p.sku_id <= 0 || !rfid_is_valid(&p.rfid))
        {
            return Err(ServiceError::ValidationError(
                "Invalid restock order data.".to_string(),
            ));
        }
        Some(
            payload
                .products
                .into_iter()
                .map(|p| ReceivedSkuItem {
                    sku_id: p.sku_id,
                    item_id: None,
                    rfid: p.rfid,
                })
                .collect(),
        )
    } else {
        None
    };

    state
        .services
        .restock_orders
        .change_state(id, new_state, received)
        .await?;

    Ok(ok_response())
}

/// Record delivered SKU instances (state must be DELIVERED)
#[utoipa::path(
    put,
    path = "/api/restockOrder/{id}/skuItems",
    params(("id" = i32, Path, description = "Restock order id")),
    request_body = AttachSkuItemsRequest,
    responses(
        (status = 200, description = "Items recorded"),
        (status = 404, description = "No such order", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid items or wrong state", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn attach_sku_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<AttachSkuItemsRequest>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;

    let malformed = payload
        .sku_items
        .iter()
        .any(|i| i.sku_id <= 0 || i.item_id <= 0 || !rfid_is_valid(&i.rfid));
    if malformed {
        return Err(ServiceError::ValidationError(
            "Invalid restock order data.".to_string(),
        ));
    }

    let items = payload
        .sku_items
        .into_iter()
        .map(|i| ReceivedSkuItem {
            sku_id: i.sku_id,
            item_id: Some(i.item_id),
            rfid: i.rfid,
        })
        .collect();

    state
        .services
        .restock_orders
        .attach_sku_items(id, items)
        .await?;

    Ok(ok_response())
}

/// Attach the transport note (state must be DELIVERY)
#[utoipa::path(
    put,
    path = "/api/restockOrder/{id}/transportNote",
    params(("id" = i32, Path, description = "Restock order id")),
    request_body = AttachTransportNoteRequest,
    responses(
        (status = 200, description = "Note attached"),
        (status = 404, description = "No such order", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid note or wrong state", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn attach_transport_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<AttachTransportNoteRequest>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;

    if !date_format_is_valid(&payload.transport_note.delivery_date) {
        return Err(ServiceError::ValidationError(
            "Invalid restock order data.".to_string(),
        ));
    }

    state
        .services
        .restock_orders
        .attach_transport_note(id, payload.transport_note.delivery_date)
        .await?;

    Ok(ok_response())
}

/// Delete a restock order (idempotent)
#[utoipa::path(
    delete,
    path = "/api/restockOrder/{id}",
    params(("id" = i32, Path, description = "Restock order id")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 422, description = "Invalid id", body = crate::errors::ErrorResponse)
    ),
    tag = "restock-orders"
)]
pub async fn delete_restock_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    validate_order_id(id)?;
    state.services.restock_orders.delete(id).await?;
    Ok(no_content_response())
}
