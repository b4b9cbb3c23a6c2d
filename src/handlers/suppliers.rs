use axum::{extract::State, response::Response};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::common::{created_response, success_response};
use crate::{errors::ServiceError, AppState};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupplierRequest {
    pub name: String,
}

/// List suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let suppliers = state.services.suppliers.list().await?;
    Ok(success_response(suppliers))
}

/// Register a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateSupplierRequest>,
) -> Result<Response, ServiceError> {
    if payload.name.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "Invalid supplier data.".to_string(),
        ));
    }
    let id = state.services.suppliers.create(payload.name).await?;
    Ok(created_response(json!({ "id": id })))
}
