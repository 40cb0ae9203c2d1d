use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::error::{AppError, AppResult, SuccessResponse};
use crate::state::AppState;
use crate::storage::{StoredFile, MAX_FILE_SIZE};

/// Room for one maximum-size file plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 1024 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListResponse {
    pub images: Vec<StoredFile>,
    pub total: usize,
}

/// Upload endpoints with their own body limit; merged under `require_admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/uploads/{folder}", get(list_images).post(upload_image))
        .route("/api/admin/uploads/{folder}/{filename}", delete(delete_image))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// POST /api/admin/uploads/{folder}
/// Stores the first file field of the multipart body
pub async fn upload_image(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return Err(AppError::validation("No file provided")),
        Err(e) => {
            tracing::error!("Multipart error: {}", e);
            return Err(AppError::validation("Invalid multipart data"));
        }
    };

    let original_name = field.file_name().unwrap_or("unknown").to_string();

    let bytes = match field.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read upload bytes: {}", e);
            return Err(AppError::validation("Failed to read file data"));
        }
    };

    let stored = state.storage.save(&folder, &original_name, &bytes).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// DELETE /api/admin/uploads/{folder}/{filename}
pub async fn delete_image(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> AppResult<Json<SuccessResponse>> {
    state.storage.delete(&folder, &filename).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/admin/uploads/{folder}
pub async fn list_images(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> AppResult<Json<ImageListResponse>> {
    let images = state.storage.list(&folder).await?;
    let total = images.len();
    Ok(Json(ImageListResponse { images, total }))
}
