use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Deserialize;
use crate::{
    config::Config,
    database::UserStore,
    models::Profile,
    services::{upload_service, user_service},
};
use crate::services::upload_service::UpdateUserForm;
use crate::services::user_service::UpdateUserResponse;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 200, description = "Profile fields of the user", body = Profile),
        (status = 401, description = "Unknown user id")
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    query: web::Query<UserQuery>,
) -> HttpResponse {
    let user_id = query.user_id.as_deref();
    log::info!("👤 GET /api/users - userId: {}", user_id.unwrap_or("N/A"));

    match user_service::get_profile(store.get_ref(), user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e @ AppError::InvalidCredentials) => {
            log::warn!("❌ Profile lookup failed: {}", user_id.unwrap_or("N/A"));
            e.error_response()
        }
        Err(e) => {
            log::error!("❌ Profile lookup error: {}", e);
            e.error_response()
        }
    }
}

/// Replaces the avatar and merges the submitted profile fields.
///
/// All images in the upload directory are removed before the body is read,
/// whatever user they belonged to.
#[utoipa::path(
    put,
    path = "/api/update-user",
    tag = "Users",
    request_body(
        content = UpdateUserForm,
        content_type = "multipart/form-data",
        description = "Profile fields plus one image file part (any field name)"
    ),
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponse),
        (status = 400, description = "Malformed multipart body"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    store: web::Data<dyn UserStore>,
    config: web::Data<Config>,
    payload: Multipart,
) -> HttpResponse {
    log::info!("✏️ PUT /api/update-user");

    upload_service::purge_images(&config.upload_dir).await;

    let upload = match upload_service::receive_update(payload, &config.upload_dir).await {
        Ok(upload) => upload,
        Err(e @ AppError::InvalidRequest(_)) => {
            log::warn!("❌ Rejected update body: {}", e);
            return e.error_response();
        }
        Err(e) => {
            log::error!("❌ Failed to store upload: {}", e);
            return e.error_response();
        }
    };

    let user_id = upload.form.user_id.clone().unwrap_or_default();
    let avatar_file = upload.files.first().map(String::as_str);

    match user_service::update_user(store.get_ref(), &config, upload.form, avatar_file).await {
        Ok(response) => {
            log::info!("✅ User updated: {}", user_id);
            HttpResponse::Ok().json(response)
        }
        Err(e @ AppError::NotFound(_)) => {
            log::warn!("❌ Update for unknown user: {}", user_id);
            e.error_response()
        }
        Err(e) => {
            log::error!("❌ Update failed for {}: {}", user_id, e);
            e.error_response()
        }
    }
}
