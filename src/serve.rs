use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::error;
use serde_json::json;
use std::sync::Arc as StdArc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServeConfig;
use crate::db::Database;
use crate::error::AppError;
use crate::records::{now_ms, ExportResponse, HolePayload, RoundPayload, ShotPayload};

// State shared by all API handlers
pub struct AppState {
    pub db: Database,
}

/// Run the tracking API server (for serve command)
pub fn serve(config: ServeConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Starting golf shot tracking server");
    println!("Listening on: http://[::]:{} (IPv4 + IPv6)", config.port);
    println!("Endpoints:");
    println!("  POST /api/shot  - Record a single shot");
    println!("  POST /api/hole  - Record a hole result");
    println!("  POST /api/round  - Create or update a round summary");
    println!("  GET /api/export/unsynced  - Rounds not yet synced, with shots and holes");
    println!("  POST /api/mark-synced/{{round_id}}  - Flag a round as synced");
    println!("  GET /health  - Database connectivity check");

    // Create tokio runtime and run server
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let db = Database::connect(&config.database_url).await?;
        println!("Connected to {} database", db.backend_name());
        db.init_schema().await?;

        let app = router(StdArc::new(AppState { db }));

        let listener = tokio::net::TcpListener::bind(format!("[::]:{}", config.port))
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", config.port, e))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Build the API router; shared with the integration tests
pub fn router(state: StdArc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/shot", post(shot_handler))
        .route("/api/hole", post(hole_handler))
        .route("/api/round", post(round_handler))
        .route("/api/export/unsynced", get(export_unsynced_handler))
        .route("/api/mark-synced/{round_id}", post(mark_synced_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Every failed request gets the same envelope: HTTP 500 with
/// {"success": false, "error": "..."}
fn error_response(err: &AppError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": err.to_string() })),
    )
        .into_response()
}

async fn shot_handler(
    State(state): State<StdArc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    match record_shot(&state, body).await {
        Ok(shot_id) => Json(json!({ "success": true, "shot_id": shot_id })).into_response(),
        Err(e) => {
            error!("Failed to record shot: {}", e);
            error_response(&e)
        }
    }
}

async fn record_shot(state: &AppState, body: serde_json::Value) -> Result<i64, AppError> {
    let payload: ShotPayload =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let shot = payload.into_record()?;

    // A shot may arrive before its round summary; register the round id so
    // the foreign key holds
    state.db.ensure_round(shot.round_id, shot.timestamp_ms).await?;
    state.db.insert_shot(&shot).await
}

async fn hole_handler(
    State(state): State<StdArc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    match record_hole(&state, body).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            error!("Failed to record hole: {}", e);
            error_response(&e)
        }
    }
}

async fn record_hole(state: &AppState, body: serde_json::Value) -> Result<(), AppError> {
    let payload: HolePayload =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let hole = payload.into_record()?;

    state.db.ensure_round(hole.round_id, now_ms()).await?;
    state.db.insert_hole(&hole).await
}

async fn round_handler(
    State(state): State<StdArc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    match upsert_round(&state, body).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            error!("Failed to upsert round: {}", e);
            error_response(&e)
        }
    }
}

async fn upsert_round(state: &AppState, body: serde_json::Value) -> Result<(), AppError> {
    let payload: RoundPayload =
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))?;
    let round = payload.into_record()?;

    state.db.upsert_round(&round).await
}

async fn export_unsynced_handler(State(state): State<StdArc<AppState>>) -> impl IntoResponse {
    match state.db.unsynced_rounds().await {
        Ok(data) => Json(ExportResponse {
            success: true,
            data,
        })
        .into_response(),
        Err(e) => {
            error!("Failed to export unsynced rounds: {}", e);
            error_response(&e)
        }
    }
}

async fn mark_synced_handler(
    State(state): State<StdArc<AppState>>,
    Path(round_id): Path<i64>,
) -> impl IntoResponse {
    // Marking an unknown or already-synced round is a no-op, not an error,
    // so the sync client can safely retry
    match state.db.mark_round_synced(round_id).await {
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            error!("Failed to mark round {} as synced: {}", round_id, e);
            error_response(&e)
        }
    }
}

async fn health_handler(State(state): State<StdArc<AppState>>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => Json(json!({ "status": "healthy", "database": "connected" })).into_response(),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
