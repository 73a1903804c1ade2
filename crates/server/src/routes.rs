pub mod usuarios;

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Message};
use service::user_record::{RecordService, SeaOrmUserRecordRepository};

use crate::openapi::ApiDoc;

pub const ROOT_MESSAGE: &str = "API está funcionando";

#[derive(Clone)]
pub struct AppState {
    pub records: RecordService<SeaOrmUserRecordRepository>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { records: RecordService::new(Arc::new(SeaOrmUserRecordRepository::new(db))) }
    }
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Reachable", body = crate::openapi::MessageDoc)))]
pub async fn root() -> Json<Message> {
    Json(Message::new(ROOT_MESSAGE))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Any origin, method and header; the origin is mirrored so credentials stay allowed.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/usuarios", get(usuarios::list_users).post(usuarios::create_user))
        .route("/usuarios/:id", get(usuarios::get_user).patch(usuarios::mark_picked_up))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
