//! # wirespool-api
//!
//! HTTP API for the wire type catalog and the remaining-length calculator.
//!
//! The router is built here so tests can drive it in process; the
//! `wirespool-api` binary adds configuration, logging and the listener.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod services;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

pub use config::{ScopeMode, ServerConfig, StorageBackend};
pub use error::ApiError;
use handlers::{calculate, health, wire_types};
use openapi::ApiDoc;
use services::CalculationService;
use wirespool_core::defaults::CORS_MAX_AGE_SECS;
use wirespool_core::WireTypeRepository;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn WireTypeRepository>,
    pub calculation: CalculationService,
    pub scope_mode: ScopeMode,
}

impl AppState {
    pub fn new(catalog: Arc<dyn WireTypeRepository>, scope_mode: ScopeMode) -> Self {
        Self {
            calculation: CalculationService::new(catalog.clone()),
            catalog,
            scope_mode,
        }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router with all middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(CORS_MAX_AGE_SECS));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        // Wire type catalog
        .route(
            "/api/wire-types",
            get(wire_types::list_wire_types).post(wire_types::create_wire_type),
        )
        .route(
            "/api/wire-types/:id",
            get(wire_types::get_wire_type)
                .put(wire_types::update_wire_type)
                .delete(wire_types::delete_wire_type),
        )
        // Calculator
        .route("/api/calculate", post(calculate::calculate_length))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::caller_cookie_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .with_state(state)
}
