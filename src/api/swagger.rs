use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile Service API",
        version = "1.0.0",
        description = "User profile backend.\n\n**Features:**\n- Email/password login issuing access and refresh tokens\n- Account registration\n- Profile lookup by user id\n- Profile update with avatar upload (multipart)"
    ),
    paths(
        // Auth endpoints
        crate::api::auth::login,
        crate::api::auth::register,

        // Users
        crate::api::users::get_user,
        crate::api::users::update_user,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::LoginResponse,
            crate::services::auth_service::TokenPair,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::RegisterResponse,

            // Users
            crate::models::Profile,
            crate::services::upload_service::UpdateUserForm,
            crate::services::user_service::UpdateUserResponse,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Login and registration. Passwords are compared in plaintext."),
        (name = "Users", description = "Profile lookup and update. Any caller may read or update any profile by id."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    )
)]
pub struct ApiDoc;
