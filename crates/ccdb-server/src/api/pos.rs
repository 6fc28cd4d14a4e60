//! `/api/v1/pos` routes: CRUD plus the OSM import.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use ccdb_core::{CandidatePos, Pos, PosStore};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_service_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(in crate::api) struct ClearResponse {
    pub deleted: u64,
}

fn validate_candidate(req_id: &str, body: &CandidatePos) -> Result<(), ApiError> {
    match body.first_blank_field() {
        Some(field) => Err(ApiError::new(
            req_id,
            "validation_error",
            format!("'{field}' must not be blank"),
        )),
        None => Ok(()),
    }
}

/// GET /api/v1/pos
pub(in crate::api) async fn list_pos<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<Pos>>>, ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    let items = state
        .service
        .list_pos()
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: items,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/pos/{id}
pub(in crate::api) async fn get_pos<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Pos>>, ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    let pos = state
        .service
        .get_pos(id)
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: pos,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/pos
pub(in crate::api) async fn create_pos<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CandidatePos>,
) -> Result<(StatusCode, Json<ApiResponse<Pos>>), ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    validate_candidate(&req_id.0, &body)?;

    let saved = state
        .service
        .upsert_pos(None, &body)
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: saved,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// PUT /api/v1/pos/{id}
pub(in crate::api) async fn update_pos<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(body): Json<CandidatePos>,
) -> Result<Json<ApiResponse<Pos>>, ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    validate_candidate(&req_id.0, &body)?;

    let saved = state
        .service
        .upsert_pos(Some(id), &body)
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: saved,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// DELETE /api/v1/pos
pub(in crate::api) async fn clear_pos<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<ClearResponse>>, ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    let deleted = state
        .service
        .clear_pos()
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: ClearResponse { deleted },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/pos/import/osm/{node_id}
pub(in crate::api) async fn import_osm_node<P>(
    State(state): State<AppState<P>>,
    Extension(req_id): Extension<RequestId>,
    Path(node_id): Path<u64>,
) -> Result<(StatusCode, Json<ApiResponse<Pos>>), ApiError>
where
    P: PosStore + Send + Sync + 'static,
{
    if node_id == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "node_id must be a positive integer",
        ));
    }

    let saved = state
        .service
        .import_from_osm_node(node_id)
        .await
        .map_err(|e| map_service_error(&req_id.0, &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: saved,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}
