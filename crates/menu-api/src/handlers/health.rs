use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use menu_shared::constants::TABLE_CATEGORIES;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    auth: &'static str,
}

/// Ready when both backend services answer. Missing tables still count as
/// ready: the dashboard shows setup instructions in that case.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.postgrest.ping(TABLE_CATEGORIES).await {
        Ok(()) => "ok",
        Err(e) if e.is_missing_relation() => "not_provisioned",
        Err(e) => {
            warn!("Readiness: database unreachable: {}", e);
            "unavailable"
        }
    };

    let auth = match state.identity.health().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!("Readiness: auth service unreachable: {}", e);
            "unavailable"
        }
    };

    let ready = database != "unavailable" && auth != "unavailable";
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            database,
            auth,
        }),
    )
}
