use axum::{
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{created_response, no_content_response, ok_response, success_response};
use crate::{
    entities::position::Model as PositionModel,
    errors::ServiceError,
    services::positions::PositionUpdate,
    validation::{position_id_is_valid, position_segment_is_valid},
    AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePositionRequest {
    #[serde(rename = "positionID")]
    pub position_id: String,
    #[serde(rename = "aisleID")]
    pub aisle: String,
    pub row: String,
    pub col: String,
    #[serde(rename = "maxWeight")]
    pub max_weight: i32,
    #[serde(rename = "maxVolume")]
    pub max_volume: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModifyPositionRequest {
    #[serde(rename = "newAisleID")]
    pub aisle: String,
    #[serde(rename = "newRow")]
    pub row: String,
    #[serde(rename = "newCol")]
    pub col: String,
    #[serde(rename = "newMaxWeight")]
    pub max_weight: i32,
    #[serde(rename = "newMaxVolume")]
    pub max_volume: i32,
    #[serde(rename = "newOccupiedWeight")]
    pub occupied_weight: i32,
    #[serde(rename = "newOccupiedVolume")]
    pub occupied_volume: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePositionIdRequest {
    #[serde(rename = "newPositionID")]
    pub new_position_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    #[serde(rename = "positionID")]
    pub position_id: String,
    #[serde(rename = "aisleID")]
    pub aisle: String,
    pub row: String,
    pub col: String,
    #[serde(rename = "maxWeight")]
    pub max_weight: i32,
    #[serde(rename = "maxVolume")]
    pub max_volume: i32,
    #[serde(rename = "occupiedWeight")]
    pub occupied_weight: i32,
    #[serde(rename = "occupiedVolume")]
    pub occupied_volume: i32,
}

impl From<PositionModel> for PositionResponse {
    fn from(model: PositionModel) -> Self {
        Self {
            position_id: model.position_id,
            aisle: model.aisle,
            row: model.row,
            col: model.col,
            max_weight: model.max_weight,
            max_volume: model.max_volume,
            occupied_weight: model.occupied_weight,
            occupied_volume: model.occupied_volume,
        }
    }
}

/// List all positions
#[utoipa::path(
    get,
    path = "/api/positions",
    responses((status = 200, description = "Positions", body = [PositionResponse])),
    tag = "positions"
)]
pub async fn list_positions(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let positions = state.services.positions.list().await?;
    let positions: Vec<PositionResponse> =
        positions.into_iter().map(PositionResponse::from).collect();
    Ok(success_response(positions))
}

/// Create a position (empty occupancy)
#[utoipa::path(
    post,
    path = "/api/position",
    request_body = CreatePositionRequest,
    responses(
        (status = 201, description = "Position created"),
        (status = 422, description = "Invalid position data", body = crate::errors::ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn create_position(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreatePositionRequest>,
) -> Result<Response, ServiceError> {
    let segments_valid = position_segment_is_valid(&payload.aisle)
        && position_segment_is_valid(&payload.row)
        && position_segment_is_valid(&payload.col);
    let concatenation_matches =
        payload.position_id == format!("{}{}{}", payload.aisle, payload.row, payload.col);
    if !segments_valid
        || !concatenation_matches
        || payload.max_weight < 0
        || payload.max_volume < 0
    {
        return Err(ServiceError::ValidationError(
            "Invalid position data.".to_string(),
        ));
    }

    state
        .services
        .positions
        .create(
            payload.position_id,
            payload.aisle,
            payload.row,
            payload.col,
            payload.max_weight,
            payload.max_volume,
        )
        .await?;

    Ok(created_response(()))
}

/// Rewrite a position, occupied figures included
#[utoipa::path(
    put,
    path = "/api/position/{position_id}",
    params(("position_id" = String, Path, description = "12-digit position id")),
    request_body = ModifyPositionRequest,
    responses(
        (status = 200, description = "Position updated"),
        (status = 404, description = "No such position", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid position data", body = crate::errors::ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn modify_position(
    State(state): State<AppState>,
    Path(position_id): Path<String>,
    axum::Json(payload): axum::Json<ModifyPositionRequest>,
) -> Result<Response, ServiceError> {
    let segments_valid = position_segment_is_valid(&payload.aisle)
        && position_segment_is_valid(&payload.row)
        && position_segment_is_valid(&payload.col);
    if !segments_valid
        || payload.max_weight < 0
        || payload.max_volume < 0
        || payload.occupied_weight < 0
        || payload.occupied_volume < 0
    {
        return Err(ServiceError::ValidationError(
            "Invalid position data.".to_string(),
        ));
    }

    state
        .services
        .positions
        .modify(
            &position_id,
            PositionUpdate {
                aisle: payload.aisle,
                row: payload.row,
                col: payload.col,
                max_weight: payload.max_weight,
                max_volume: payload.max_volume,
                occupied_weight: payload.occupied_weight,
                occupied_volume: payload.occupied_volume,
            },
        )
        .await?;

    Ok(ok_response())
}

/// Rename a position to a new 12-digit id
#[utoipa::path(
    put,
    path = "/api/position/{position_id}/changeID",
    params(("position_id" = String, Path, description = "12-digit position id")),
    request_body = ChangePositionIdRequest,
    responses(
        (status = 200, description = "Position renamed"),
        (status = 404, description = "No such position", body = crate::errors::ErrorResponse),
        (status = 422, description = "Invalid position id", body = crate::errors::ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn change_position_id(
    State(state): State<AppState>,
    Path(position_id): Path<String>,
    axum::Json(payload): axum::Json<ChangePositionIdRequest>,
) -> Result<Response, ServiceError> {
    if !position_id_is_valid(&payload.new_position_id) {
        return Err(ServiceError::ValidationError(
            "Invalid position id.".to_string(),
        ));
    }

    state
        .services
        .positions
        .change_id(&position_id, &payload.new_position_id)
        .await?;

    Ok(ok_response())
}

/// Delete a position (idempotent; clears the holding SKU's backreference)
#[utoipa::path(
    delete,
    path = "/api/position/{position_id}",
    params(("position_id" = String, Path, description = "12-digit position id")),
    responses(
        (status = 204, description = "Deleted (or already absent)"),
        (status = 422, description = "Invalid position id", body = crate::errors::ErrorResponse)
    ),
    tag = "positions"
)]
pub async fn delete_position(
    State(state): State<AppState>,
    Path(position_id): Path<String>,
) -> Result<Response, ServiceError> {
    if !position_id_is_valid(&position_id) {
        return Err(ServiceError::ValidationError(
            "Validation of positionID failed".to_string(),
        ));
    }

    state.services.positions.delete(&position_id).await?;
    Ok(no_content_response())
}
