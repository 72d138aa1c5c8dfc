use axum::response::Json;
use tracing::debug;

use crate::models::PingResponse;

/// Liveness check
pub async fn ping_handler() -> Json<PingResponse> {
    debug!("Ping requested");
    Json(PingResponse::pong())
}
