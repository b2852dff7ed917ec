use std::sync::Arc;

use axum::{routing::get, Json, Router};
use danran::domain::RoleTemplateRegistry;
use danran::ports::GenerationService;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
mod services;
#[cfg(test)]
mod test_support;

use adapters::{FileSessionStore, GeminiClient};
use application::SessionService;
use config::Config;
use services::{MomentExtractor, PersonaInstantiator, Responder, SceneComposer};

/// Type alias for the application service with the concrete store
pub type AppSessionService = SessionService<FileSessionStore>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<AppSessionService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Danran API is running - the family is gathered around the table".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "danran_server=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("🏠 Danran API initializing...");

    let config = Config::from_env();

    let api_key = config
        .gemini_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is required"))?;
    let mut client = GeminiClient::new(api_key);
    if let Some(model) = config.gemini_model.clone() {
        client = client.with_model(model);
    }
    let generation: Arc<dyn GenerationService> = Arc::new(client);
    tracing::info!("✨ Generation client initialized (Gemini)");

    let store = Arc::new(FileSessionStore::new(config.data_dir.clone()));
    tracing::info!("💾 Session store at {}", config.data_dir.display());

    let session_service = Arc::new(SessionService::new(
        store,
        PersonaInstantiator::new(RoleTemplateRegistry::new(), generation.clone()),
        Responder::new(generation.clone(), config.turn_deadline),
        MomentExtractor::new(generation.clone()),
        SceneComposer::new(generation),
        config.greet_on_start,
    ));

    let state = AppState { session_service };

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            routes::swagger::ApiDoc::openapi(),
        ))
        .route("/health", get(health_check))
        .merge(routes::session::router())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("🚀 Danran API listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
