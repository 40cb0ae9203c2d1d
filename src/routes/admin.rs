/**
 * Admin Content Routes
 * CRUD over the four content collections, mounted behind `require_admin`
 */
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::content::{
    model::{BlogPost, Project, Service, Testimonial},
    service, Collection, Document,
};
use crate::error::{AppError, AppResult, SuccessResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub counts: BTreeMap<&'static str, i64>,
    pub backend: &'static str,
}

fn collection(segment: &str) -> AppResult<Collection> {
    Collection::from_route(segment).ok_or_else(|| AppError::NotFound(format!("Unknown collection '{segment}'")))
}

// Each handler resolves the path segment to a collection, then runs the typed
// operation for that collection's record type.
macro_rules! dispatch {
    ($collection:expr, $op:ident ( $($arg:expr),* )) => {
        match $collection {
            Collection::Projects => $op::<Project>($($arg),*).await,
            Collection::BlogPosts => $op::<BlogPost>($($arg),*).await,
            Collection::Services => $op::<Service>($($arg),*).await,
            Collection::Testimonials => $op::<Testimonial>($($arg),*).await,
        }
    };
}

async fn list_all<T: Document>(state: &AppState) -> AppResult<Response> {
    let items = service::list_typed::<T>(&state.store).await?;
    Ok(Json(items).into_response())
}

async fn get_one<T: Document>(state: &AppState, id: &str) -> AppResult<Response> {
    let doc = service::get_typed::<T>(&state.store, id)
        .await?
        .ok_or_else(|| AppError::not_found(T::LABEL))?;
    Ok(Json(doc).into_response())
}

async fn create_one<T: Document>(state: &AppState, payload: Value) -> AppResult<Response> {
    let doc = service::create::<T>(&state.store, payload).await?;
    Ok((StatusCode::CREATED, Json(doc)).into_response())
}

async fn update_one<T: Document>(state: &AppState, id: &str, patch: Value) -> AppResult<Response> {
    let doc = service::update::<T>(&state.store, id, patch).await?;
    Ok(Json(doc).into_response())
}

async fn delete_one<T: Document>(state: &AppState, id: &str) -> AppResult<Response> {
    service::delete::<T>(&state.store, &state.storage, id).await?;
    Ok(Json(SuccessResponse { success: true }).into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/admin/{collection}
pub async fn list(State(state): State<AppState>, Path(segment): Path<String>) -> AppResult<Response> {
    dispatch!(collection(&segment)?, list_all(&state))
}

/// POST /api/admin/{collection}
pub async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(payload): Json<Value>,
) -> AppResult<Response> {
    dispatch!(collection(&segment)?, create_one(&state, payload))
}

/// GET /api/admin/{collection}/{id}
pub async fn get(State(state): State<AppState>, Path((segment, id)): Path<(String, String)>) -> AppResult<Response> {
    dispatch!(collection(&segment)?, get_one(&state, &id))
}

/// PATCH /api/admin/{collection}/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> AppResult<Response> {
    dispatch!(collection(&segment)?, update_one(&state, &id, patch))
}

/// DELETE /api/admin/{collection}/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
) -> AppResult<Response> {
    dispatch!(collection(&segment)?, delete_one(&state, &id))
}

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let mut counts = BTreeMap::new();
    for collection in Collection::ALL {
        counts.insert(collection.as_str(), state.store.count(collection).await?);
    }
    Ok(Json(StatsResponse {
        counts,
        backend: state.store.backend(),
    }))
}
