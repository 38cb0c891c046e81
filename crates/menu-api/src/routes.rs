use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::middleware::require_admin;
use crate::state::AppState;

/// Room for a new upload plus a carried inline copy of an earlier one
fn item_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_mul(3).saturating_add(1024 * 1024)
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.app.static_dir.clone();
    let body_limit = item_body_limit(state.config.menu.max_upload_bytes);

    // Public routes
    let public_routes = Router::new()
        .route("/", get(handlers::public::landing))
        .route("/menu", get(handlers::public::menu))
        .route("/menu/items/{id}", get(handlers::public::item_detail))
        .route(
            "/auth/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    let item_routes = Router::new()
        .route("/admin/items", post(handlers::admin::create_item))
        .route("/admin/items/{id}", post(handlers::admin::update_item))
        .layer(DefaultBodyLimit::max(body_limit));

    // Dashboard (session required)
    let admin_routes = Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route("/admin/items/{id}/delete", post(handlers::admin::delete_item))
        .route("/admin/categories", post(handlers::admin::create_category))
        .route("/admin/categories/{id}", post(handlers::admin::update_category))
        .route("/admin/categories/{id}/delete", post(handlers::admin::delete_category))
        .merge(item_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CookieManagerLayer::new())
}
