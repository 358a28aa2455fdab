use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::database::UserStore;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    /// Number of stored users, absent when the users file cannot be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Users file is unreadable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn UserStore>) -> HttpResponse {
    let users = match store.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            log::error!("❌ Health check: {}", e);
            None
        }
    };

    let response = HealthResponse {
        status: if users.is_some() { "healthy" } else { "degraded" }.to_string(),
        service: "profile-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        users,
    };

    if response.users.is_some() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
