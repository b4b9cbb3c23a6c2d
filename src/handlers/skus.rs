use axum::{
    extract::{Path, State},
    response::Response,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::common::{created_response, no_content_response, ok_response, success_response};
use crate::{
    errors::ServiceError,
    services::skus::{SkuRecord, SkuUpdate},
    validation::position_id_is_valid,
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSkuRequest {
    pub description: String,
    pub weight: i32,
    pub volume: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub price: Decimal,
    #[serde(rename = "availableQuantity")]
    pub available_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifySkuRequest {
    #[serde(rename = "newDescription")]
    pub description: String,
    #[serde(rename = "newWeight")]
    pub weight: i32,
    #[serde(rename = "newVolume")]
    pub volume: i32,
    #[serde(rename = "newNotes", default)]
    pub notes: Option<String>,
    #[serde(rename = "newPrice")]
    pub price: Decimal,
    #[serde(rename = "newAvailableQuantity")]
    pub available_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignPositionRequest {
    pub position: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SkuResponse {
    pub id: i32,
    pub description: String,
    pub weight: i32,
    pub volume: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "availableQuantity")]
    pub available_quantity: i32,
    pub price: Decimal,
    #[serde(rename = "testDescriptors")]
    pub test_descriptors: Vec<i32>,
}

impl From<SkuRecord> for SkuResponse {
    fn from(record: SkuRecord) -> Self {
        Self {
            id: record.sku.id,
            description: record.sku.description,
            weight: record.sku.weight,
            volume: record.sku.volume,
            notes: record.sku.notes,
            position: record.position,
            available_quantity: record.sku.available_quantity,
            price: record.sku.price,
            test_descriptors: record.test_descriptors,
        }
    }
}

fn validate_sku_id(id: i32) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::ValidationError("Invalid SKU id.".to_string()));
    }
    Ok(())
}

fn validate_sku_fields(
    weight: i32,
    volume: i32,
    price: Decimal,
    available_quantity: i32,
) -> Result<(), ServiceError> {
    if weight < 0 || volume < 0 || price <= Decimal::ZERO || available_quantity < 0 {
        return Err(ServiceError::ValidationError(
            "Invalid SKU data.".to_string(),
        ));
    }
    Ok(())
}

/// List all SKUs
#[utoipa::path(
    get,
    path = "/api/skus",
    responses((status = 200, description = "SKUs", body = [SkuResponse])),
    tag = "skus"
)]
pub async fn list_skus(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let records = state.services.skus.list().await?;
    let skus: Vec<SkuResponse> = records.into_iter().map(SkuResponse::from).collect();
    Ok(success_response(skus))
}

/// Fetch one SKU
#[utoipa::path(
    get,
    path = "/api/skus/{id}",
    params(("id" = i32, Path, description = "SKU id")),
    responses(
        (status = 200, description = "SKU", body = SkuResponse),
        (status = 404, description = "No such SKU", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid id", body = crate::errors::ErrorResponse)
    ),
    tag = "skus"
)]
pub async fn get_sku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    validate_sku_id(id)?;
    match state.services.skus.get(id).await? {
        Some(record) => Ok(success_response(SkuResponse::from(record))),
        None => Err(ServiceError::NotFound("No SKU with matching id".to_string())),
    }
}

/// Create a SKU (no position assigned)
#[utoipa::path(
    post,
    path = "/api/sku",
    request_body = CreateSkuRequest,
    responses(
        (status = 201, description = "SKU created"),
        (status = 422, description = "Invalid SKU data", body = crate::errors::ErrorResponse)
    ),
    tag = "skus"
)]
pub async fn create_sku(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSkuRequest>,
) -> Result<Response, ServiceError> {
    validate_sku_fields(
        payload.weight,
        payload.volume,
        payload.price,
        payload.available_quantity,
    )?;

    let id = state
        .services
        .skus
        .create(
            payload.description,
            payload.weight,
            payload.volume,
            payload.notes,
            payload.price,
            payload.available_quantity,
        )
        .await?;

    Ok(created_response(json!({ "id": id })))
}

/// Modify a SKU; quantity changes propagate to the held position
#[utoipa::path(
    put,
    path = "/api/sku/{id}",
    params(("id" = i32, Path, description = "SKU id")),
    request_body = ModifySkuRequest,
    responses(
        (status = 200, description = "SKU updated"),
        (status = 404, description = "No such SKU (or its position vanished)", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid SKU data", body = crate::errors::ErrorResponse)
    ),
    tag = "skus"
)]
pub async fn modify_sku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<ModifySkuRequest>,
) -> Result<Response, ServiceError> {
    validate_sku_id(id)?;
    validate_sku_fields(
        payload.weight,
        payload.volume,
        payload.price,
        payload.available_quantity,
    )?;

    state
        .services
        .skus
        .modify(
            id,
            SkuUpdate {
                description: payload.description,
                weight: payload.weight,
                volume: payload.volume,
                notes: payload.notes,
                price: payload.price,
                available_quantity: payload.available_quantity,
            },
        )
        .await?;

    Ok(ok_response())
}

/// Assign the SKU to a storage position
#[utoipa::path(
    put,
    path = "/api/sku/{id}/position",
    params(("id" = i32, Path, description = "SKU id")),
    request_body = AssignPositionRequest,
    responses(
        (status = 200, description = "Position assigned"),
        (status = 404, description = "No such SKU or position", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid or occupied position", body = crate::errors::ErrorResponse)
    ),
    tag = "skus"
)]
pub async fn assign_sku_position(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Json(payload): axum::Json<AssignPositionRequest>,
) -> Result<Response, ServiceError> {
    validate_sku_id(id)?;
    if !position_id_is_valid(&payload.position) {
        return Err(ServiceError::ValidationError(
            "Invalid position id.".to_string(),
        ));
    }

    state
        .services
        .skus
        .assign_position(id, &payload.position)
        .await?;

    Ok(ok_response())
}

/// Delete a SKU (refused while referenced; releases its position)
#[utoipa::path(
    delete,
    path = "/api/skus/{id}",
    params(("id" = i32, Path, description = "SKU id")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 422, description = "Invalid id or SKU still referenced", body = crate::errors::ErrorResponse)
    ),
    tag = "skus"
)]
pub async fn delete_sku(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    validate_sku_id(id)?;
    state.services.skus.delete(id).await?;
    Ok(no_content_response())
}
