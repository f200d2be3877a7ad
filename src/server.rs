//! HTTP app assembly: merges the route groups and wraps them in the
//! request tracing and CORS layers.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::{ConfigError, Result};
use crate::explore::{ExploreRouteState, StudentDirectory, explore_routes};
use crate::onboarding::{
    OnboardingRouteState, WizardManager, onboarding_routes, spawn_session_sweeper,
};
use crate::store::{LibSqlBackend, ProfileStore};

/// Open the database and student directory named by `config`, start the
/// idle-session sweeper and build the router.
pub async fn build_app(config: &ServerConfig) -> Result<Router> {
    let cors = cors_layer(config.cors_origin.as_deref())?;
    let store: Arc<dyn ProfileStore> = Arc::new(LibSqlBackend::new_local(&config.db_path).await?);

    let directory = match &config.students_path {
        Some(path) => StudentDirectory::from_json_file(path)?,
        None => StudentDirectory::demo(),
    };

    let manager = WizardManager::new(store);
    spawn_session_sweeper(Arc::clone(&manager), config.session_idle());

    Ok(app(manager, directory, cors))
}

/// Build the full application router.
pub fn app(
    manager: Arc<WizardManager>,
    directory: Arc<StudentDirectory>,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(onboarding_routes(OnboardingRouteState { manager }))
        .merge(explore_routes(ExploreRouteState { directory }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// CORS for the web client. `None` allows any origin.
pub fn cors_layer(origin: Option<&str>) -> std::result::Result<CorsLayer, ConfigError> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        None => Ok(layer.allow_origin(Any)),
        Some(origin) => {
            let value = HeaderValue::from_str(origin).map_err(|e| ConfigError::InvalidValue {
                key: "SKILL_BUDDY_CORS_ORIGIN".to_string(),
                message: e.to_string(),
            })?;
            Ok(layer.allow_origin(value))
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "skill-buddy"
    }))
}
