use axum::Json;

use crate::models::status::{HEALTH_INFO, HealthStatus, WELCOME_MESSAGE, Welcome};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = Welcome)
    ),
    tag = "status"
)]
pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: WELCOME_MESSAGE.to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/test",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
    tag = "status"
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
        info: HEALTH_INFO.to_owned(),
    })
}
