use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::database::{CompanyStore, UserStore};
use crate::handlers::{companies, system};
use crate::middleware::{basic_auth_middleware, mask_internal_errors};
use crate::services::CompanyService;

/// Shared handler state; the stores are injected by whoever builds the app
#[derive(Clone)]
pub struct AppState {
    pub companies: CompanyService,
    pub authenticator: Authenticator,
}

impl AppState {
    pub fn new(companies: Arc<dyn CompanyStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            companies: CompanyService::new(companies),
            authenticator: Authenticator::new(users),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(company_read_routes())
        // Basic auth
        .merge(company_write_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        );

    if !config.api.expose_internal_errors {
        router = router.layer(from_fn(mask_internal_errors));
    }
    if let Some(cors) = cors_layer(config) {
        router = router.layer(cors);
    }

    router.with_state(state)
}

fn company_read_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(companies::list))
        .route("/companies/", get(companies::list))
        .route("/companies/:id", get(companies::get))
}

fn company_write_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/companies", post(companies::create))
        .route(
            "/companies/:id",
            axum::routing::patch(companies::update).delete(companies::delete),
        )
        .route_layer(from_fn_with_state(state, basic_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    Some(CorsLayer::new().allow_origin(AllowOrigin::list(origins)))
}
