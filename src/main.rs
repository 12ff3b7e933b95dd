mod api;
mod app_data;
mod bootstrap;
mod config;
mod errors;
mod services;
mod stores;
mod types;

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use api::{DcfLogApi, HealthApi, PermissionApi, RoleApi, SettingsApi, UserApi};
use app_data::AppData;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    // Load database URL from environment or use default
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://dcf_admin.db?mode=rwc".to_string());

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!(url = %database_url, "connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("database migrations completed");

    let app_data = Arc::new(AppData::new(db));

    // Ensure the ADMIN role, admin account and demo accounts exist
    bootstrap::seed_defaults(&app_data)
        .await
        .expect("Failed to seed default records");

    let api_service = OpenApiService::new(
        (
            HealthApi,
            UserApi::new(app_data.clone()),
            RoleApi::new(app_data.clone()),
            PermissionApi::new(app_data.clone()),
            SettingsApi::new(app_data.clone()),
            DcfLogApi::new(app_data.clone()),
        ),
        "DCF Admin API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    // Compose routes: API under /api, Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!("starting server on http://0.0.0.0:3000");
    tracing::info!("swagger ui available at http://localhost:3000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:3000")).run(app).await
}
