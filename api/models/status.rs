use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const WELCOME_MESSAGE: &str = "Welcome to CraftHub API!";
pub const HEALTH_INFO: &str = "Backend is running";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Welcome {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub info: String,
}
