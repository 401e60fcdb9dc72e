use axum::Json;

use super::staff::MessageResponse;

/// GET /health — unauthenticated liveness probe.
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Agent Hub Staff Timetable API is running".to_string(),
    })
}
