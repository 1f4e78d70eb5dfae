// Axum web server layer

use axum::{error_handling::HandleErrorLayer, middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod handlers;
pub mod middleware;
pub mod requests;
pub mod responses;

use crate::auth::auth_middleware::{auth_middleware, AuthState};
use crate::metrics::Metrics;
use crate::store::BoardStore;

pub use crate::config::Config;

/// Application state containing all shared dependencies
///
/// Handlers only ever see the store through `BoardStore`; the collections
/// themselves are never reachable from here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BoardStore + Send + Sync>,
    pub metrics: Arc<Metrics>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Tracing (tower-http::trace) - request logging
/// - CORS (tower-http::cors) - permissive
/// - Security response headers (tower-http::set_header)
/// - Panic recovery (tower-http::catch_panic) - 500, detail hidden in production
/// - Request timeout (tower::timeout) - 408
/// - Body size limit (tower-http::limit) - 413
/// - Auth middleware - bearer token (card and list routes only)
///
/// `/health` and `/metrics` bypass auth.
pub fn create_router(app_state: &AppState, auth_state: Arc<AuthState>) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/card",
            get(handlers::list_cards_handler).post(handlers::create_card_handler),
        )
        .route(
            "/card/:id",
            get(handlers::get_card_handler).delete(handlers::delete_card_handler),
        )
        .route(
            "/list",
            get(handlers::list_lists_handler).post(handlers::create_list_handler),
        )
        .route(
            "/list/:id",
            get(handlers::get_list_handler).delete(handlers::delete_list_handler),
        )
        .route_layer(from_fn_with_state(auth_state, auth_middleware));

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(protected);

    let config = &app_state.config;

    router = router.layer(middleware::body_size_limit_layer(config.body_size_limit_bytes));

    // HandleErrorLayer must come BEFORE timeout to catch the timeout error
    let timeout_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(middleware::handle_middleware_error))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .into_inner();
    router = router.layer(timeout_stack);

    router = router.layer(middleware::catch_panic_layer(config.is_production()));

    for (name, value) in middleware::security_headers() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
    }

    router
        .layer(middleware::cors_layer())
        .layer(middleware::tracing_layer())
}
