use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::entities::staff;

#[derive(Debug, Deserialize)]
pub struct StaffRequest {
    pub name: String,
    #[serde(default)]
    pub schedule: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: String,
    pub name: String,
    /// Raw JSON-encoded schedule string, passed through untouched.
    pub schedule: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<staff::Model> for StaffResponse {
    fn from(model: staff::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            schedule: model.schedule,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StaffListResponse {
    pub staff: Vec<StaffResponse>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub is_active: Option<bool>,
}

/// GET /staff/
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<StaffListResponse>, ApiError> {
    let members = state.store().list_staff(query.is_active).await?;

    Ok(Json(StaffListResponse {
        staff: members.into_iter().map(StaffResponse::from).collect(),
    }))
}

/// POST /staff/
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StaffRequest>,
) -> Result<(StatusCode, Json<StaffResponse>), ApiError> {
    let created = state
        .store()
        .create_staff(&payload.name, payload.schedule.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /staff/{id}
pub async fn get_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StaffResponse>, ApiError> {
    let member = state
        .store()
        .get_staff(&id)
        .await?
        .ok_or_else(ApiError::staff_not_found)?;

    Ok(Json(member.into()))
}

/// PUT /staff/{id}
pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<StaffRequest>,
) -> Result<Json<StaffResponse>, ApiError> {
    let updated = state
        .store()
        .update_staff(&id, &payload.name, payload.schedule.as_deref())
        .await?
        .ok_or_else(ApiError::staff_not_found)?;

    Ok(Json(updated.into()))
}

/// DELETE /staff/{id} — soft delete, idempotent on inactive rows.
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deactivated = state
        .store()
        .deactivate_staff(&id)
        .await?
        .ok_or_else(ApiError::staff_not_found)?;

    Ok(Json(MessageResponse {
        message: format!("Staff member {} deactivated successfully", deactivated.name),
    }))
}
