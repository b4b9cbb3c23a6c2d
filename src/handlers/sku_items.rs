use axum::{
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{created_response, no_content_response, ok_response, success_response};
use crate::{
    entities::sku_item::Model as SkuItemModel,
    errors::ServiceError,
    validation::{date_is_valid, rfid_is_valid},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkuItemRequest {
    #[serde(rename = "RFID")]
    pub rfid: String,
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "DateOfStock", default)]
    pub date_of_stock: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifySkuItemRequest {
    #[serde(rename = "newRFID")]
    pub new_rfid: String,
    #[serde(rename = "newAvailable")]
    pub new_available: i32,
    #[serde(rename = "newDateOfStock", default)]
    pub new_date_of_stock: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkuItemResponse {
    #[serde(rename = "RFID")]
    pub rfid: String,
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "Available")]
    pub available: i32,
    #[serde(rename = "DateOfStock")]
    pub date_of_stock: Option<String>,
}

/// Read model for the per-SKU listing: only available instances qualify, so
/// the availability flag is omitted.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailableSkuItemResponse {
    #[serde(rename = "RFID")]
    pub rfid: String,
    #[serde(rename = "SKUId")]
    pub sku_id: i32,
    #[serde(rename = "DateOfStock")]
    pub date_of_stock: Option<String>,
}

impl From<SkuItemModel> for SkuItemResponse {
    fn from(model: SkuItemModel) -> Self {
        Self {
            rfid: model.rfid,
            sku_id: model.sku_id,
            available: i32::from(model.available),
            date_of_stock: model.date_of_stock,
        }
    }
}

impl From<SkuItemModel> for AvailableSkuItemResponse {
    fn from(model: SkuItemModel) -> Self {
        Self {
            rfid: model.rfid,
            sku_id: model.sku_id,
            date_of_stock: model.date_of_stock,
        }
    }
}

/// List all SKU items
pub async fn list_sku_items(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let items = state.services.sku_items.list().await?;
    let items: Vec<SkuItemResponse> = items.into_iter().map(SkuItemResponse::from).collect();
    Ok(success_response(items))
}

/// List the available instances of one SKU
pub async fn list_sku_items_by_sku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::ValidationError("Invalid SKU id".to_string()));
    }
    let items = state.services.sku_items.list_by_sku(id).await?;
    let items: Vec<AvailableSkuItemResponse> = items
        .into_iter()
        .map(AvailableSkuItemResponse::from)
        .collect();
    Ok(success_response(items))
}

/// Fetch one SKU item by RFID
pub async fn get_sku_item(
    State(state): State<AppState>,
    Path(rfid): Path<String>,
) -> Result<Response, ServiceError> {
    if !rfid_is_valid(&rfid) {
        return Err(ServiceError::ValidationError(
            "Invalid SKU item rfid.".to_string(),
        ));
    }
    match state.services.sku_items.get(&rfid).await? {
        Some(item) => Ok(success_response(SkuItemResponse::from(item))),
        None => Err(ServiceError::NotFound(
            "No SKU item with matching rfid".to_string(),
        )),
    }
}

/// Register a SKU item (unavailable until stocked)
pub async fn create_sku_item(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSkuItemRequest>,
) -> Result<Response, ServiceError> {
    let stock_date_valid = payload
        .date_of_stock
        .as_deref()
        .map_or(true, date_is_valid);
    if !rfid_is_valid(&payload.rfid) || payload.sku_id <= 0 || !stock_date_valid {
        return Err(ServiceError::ValidationError(
            "Invalid SKU item data.".to_string(),
        ));
    }

    state
        .services
        .sku_items
        .create(payload.rfid, payload.sku_id, payload.date_of_stock)
        .await?;

    Ok(created_response(()))
}

/// Rewrite RFID, availability, and stock date
pub async fn modify_sku_item(
    State(state): State<AppState>,
    Path(rfid): Path<String>,
    axum::Json(payload): axum::Json<ModifySkuItemRequest>,
) -> Result<Response, ServiceError> {
    let stock_date_valid = payload
        .new_date_of_stock
        .as_deref()
        .map_or(true, date_is_valid);
    if !rfid_is_valid(&rfid)
        || !rfid_is_valid(&payload.new_rfid)
        || !(0..=1).contains(&payload.new_available)
        || !stock_date_valid
    {
        return Err(ServiceError::ValidationError(
            "Invalid SKU item data.".to_string(),
        ));
    }

    state
        .services
        .sku_items
        .modify(
            &rfid,
            payload.new_rfid,
            payload.new_available == 1,
            payload.new_date_of_stock,
        )
        .await?;

    Ok(ok_response())
}

/// Delete a SKU item by RFID (idempotent)
pub async fn delete_sku_item(
    State(state): State<AppState>,
    Path(rfid): Path<String>,
) -> Result<Response, ServiceError> {
    if !rfid_is_valid(&rfid) {
        return Err(ServiceError::ValidationError(
            "Validation of rfid failed".to_string(),
        ));
    }
    state.services.sku_items.delete(&rfid).await?;
    Ok(no_content_response())
}
