use actix_web::{web, HttpResponse, ResponseError};
use crate::{config::Config, database::UserStore, services::auth_service};
use crate::services::auth_service::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    store: web::Data<dyn UserStore>,
    config: web::Data<Config>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /api/login - email: {}", request.email);

    match auth_service::login(store.get_ref(), &config, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e @ AppError::InvalidCredentials) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            e.error_response()
        }
        Err(e) => {
            log::error!("❌ Login error: {} - {}", request.email, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = RegisterResponse),
        (status = 409, description = "User already exists")
    )
)]
pub async fn register(
    store: web::Data<dyn UserStore>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email = request.email.clone();
    log::info!("📝 POST /api/register - email: {}", email);

    match auth_service::register(store.get_ref(), request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {} ({})", email, response.user_id);
            HttpResponse::Created().json(response)
        }
        Err(e @ AppError::Conflict(_)) => {
            log::warn!("❌ Registration rejected: {}", e);
            e.error_response()
        }
        Err(e) => {
            log::error!("❌ Registration failed: {} - {}", email, e);
            e.error_response()
        }
    }
}
