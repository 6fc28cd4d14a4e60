mod pos;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use ccdb_core::{PosService, PosStore, ServiceError};
use ccdb_osm::OsmClient;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

/// Shared handler state. Generic over the store so routes can be exercised
/// against an in-memory store.
pub struct AppState<P> {
    pub service: Arc<PosService<OsmClient, P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<P> AppState<P>
where
    P: PosStore + Sync,
{
    pub fn new(nodes: OsmClient, store: P) -> Self {
        Self {
            service: Arc::new(PosService::new(nodes, store)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_service_error(request_id: &str, error: &ServiceError) -> ApiError {
    match error {
        ServiceError::OsmNodeNotFound { .. } | ServiceError::PosNotFound { .. } => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        ServiceError::OsmNodeMissingFields { .. } => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        ServiceError::DuplicatePosName { .. } => {
            ApiError::new(request_id, "conflict", error.to_string())
        }
        ServiceError::Storage(_) => {
            tracing::error!(error = %error, "storage operation failed");
            ApiError::new(request_id, "internal_error", "storage operation failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app<P>(state: AppState<P>) -> Router
where
    P: PosStore + Send + Sync + 'static,
{
    Router::new()
        .route("/api/v1/health", get(health::<P>))
        .route(
            "/api/v1/pos",
            get(pos::list_pos::<P>)
                .post(pos::create_pos::<P>)
                .delete(pos::clear_pos::<P>),
        )
        .route(
            "/api/v1/pos/{id}",
            get(pos::get_pos::<P>).put(pos::update_pos::<P>),
        )
        .route(
            "/api/v1/pos/import/osm/{node_id}",
            post(pos::import_osm_node::<P>),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse
where
    P: PosStore + Send + Sync + 'static,
{
    let meta = ResponseMeta::new(req_id.0);

    match state.service.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}
