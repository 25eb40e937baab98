use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::SERVICE;
use crate::methods::routes::SERVICE_HEALTH_PATH;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = SERVICE_HEALTH_PATH,
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
    })
}
