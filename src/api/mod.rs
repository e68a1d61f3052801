//! HTTP surface of the intake service

pub mod auth;
pub mod intake_routes;
pub mod response;

use axum::{http::HeaderValue, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::AppConfig;
use crate::mapping::MappingMode;
use crate::repository::RecordRepository;
use crate::services::IntakeService;

pub use auth::{JwtConfig, UserClaims};
pub use response::{ApiError, IntakeResponse};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
    /// Mapping mode when a request does not pass `?strict=`
    pub default_mode: MappingMode,
    /// `None` disables the authenticated group
    pub jwt: Option<Arc<JwtConfig>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn RecordRepository>, config: &AppConfig) -> Self {
        Self {
            intake: IntakeService::new(repository),
            default_mode: MappingMode::from_flag(config.strict_mapping),
            jwt: config
                .jwt_secret
                .as_deref()
                .map(|secret| Arc::new(JwtConfig::from_secret(secret.as_bytes()))),
        }
    }
}

/// Build the full router: public intake routes, ping, the authenticated
/// group, tracing and CORS, all mounted under the configured prefix.
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let protected = Router::new()
        .route("/user", get(auth::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    let routes = intake_routes::create_intake_router()
        .route("/ping", get(intake_routes::ping))
        .merge(protected)
        .with_state(state);

    let app = if config.route_prefix.is_empty() {
        routes
    } else {
        Router::new().nest(&config.route_prefix, routes)
    };

    app.layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
