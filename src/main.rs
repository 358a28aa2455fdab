mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use database::{JsonFileStore, UserStore};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Profile Service...");
    log::info!("📄 Users file: {}", config.users_file.display());
    log::info!("🖼️ Upload directory: {}", config.upload_dir.display());

    let store = JsonFileStore::new(&config.users_file);
    match store.count().await {
        Ok(count) => log::info!("✅ Loaded {} users", count),
        Err(e) => log::warn!("⚠️  Users file is not readable yet: {}", e),
    }

    let store: Arc<dyn UserStore> = Arc::new(store);
    let store_data: web::Data<dyn UserStore> = web::Data::from(store);
    let config_data = web::Data::new(config.clone());

    log::info!("🌐 Server running at http://{}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let cors_origin = config.cors_origin.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        // OpenAPI document
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
