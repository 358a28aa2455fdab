pub mod auth;
pub mod health;
pub mod swagger;
pub mod users;


use actix_web::{error::InternalError, web, HttpResponse};

/// Registers every route. Callers provide `web::Data<dyn UserStore>` and
/// `web::Data<Config>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        log::warn!("❌ Rejected JSON body: {}", message);
        InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(serde_json::json!({ "message": message })),
        )
        .into()
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            .route("/login", web::post().to(auth::login))
            .route("/register", web::post().to(auth::register))
            .route("/users", web::get().to(users::get_user))
            .route("/update-user", web::put().to(users::update_user)),
    );
}
