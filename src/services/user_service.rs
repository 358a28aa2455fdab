use crate::{
    config::Config,
    database::UserStore,
    models::{Profile, UserRecord},
    services::upload_service::UpdateUserForm,
    utils::AppError,
};
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateUserResponse {
    pub message: String,
    pub data: Profile,
}

pub async fn get_profile(store: &dyn UserStore, user_id: Option<&str>) -> Result<Profile, AppError> {
    let user_id = user_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::InvalidCredentials)?;

    store
        .find_by_id(user_id)
        .await?
        .map(|user| user.profile())
        .ok_or(AppError::InvalidCredentials)
}

/// Submitted value wins unless it is missing or empty.
fn pick(submitted: &Option<String>, current: Option<String>) -> Option<String> {
    submitted
        .as_ref()
        .filter(|value| !value.is_empty())
        .cloned()
        .or(current)
}

/// Overlays the submitted form (and the new avatar path, if any) on top of
/// the stored profile.
pub fn merge_profile(current: Profile, form: &UpdateUserForm, avatar: Option<String>) -> Profile {
    Profile {
        first_name: pick(&form.first_name, current.first_name),
        last_name: pick(&form.last_name, current.last_name),
        street: pick(&form.street, current.street),
        country: pick(&form.country, current.country),
        city: pick(&form.city, current.city),
        avatar: pick(&avatar, current.avatar),
        bio: pick(&form.bio, current.bio),
    }
}

pub fn avatar_path(config: &Config, file_name: &str) -> String {
    format!("{}/{}", config.avatar_prefix.trim_end_matches('/'), file_name)
}

pub async fn update_user(
    store: &dyn UserStore,
    config: &Config,
    form: UpdateUserForm,
    avatar_file: Option<&str>,
) -> Result<UpdateUserResponse, AppError> {
    let user_id = form.user_id.clone().unwrap_or_default();
    // records stored without an id must never match
    if user_id.is_empty() {
        return Err(AppError::NotFound(user_id));
    }
    let avatar = avatar_file.map(|name| avatar_path(config, name));

    let updated = store
        .update(
            &user_id,
            Box::new(move |user: &mut UserRecord| {
                let merged = merge_profile(user.profile(), &form, avatar);
                user.apply_profile(merged);
            }),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(user_id.clone()))?;

    Ok(UpdateUserResponse {
        message: "User updated successfully".to_string(),
        data: updated.profile(),
    })
}
