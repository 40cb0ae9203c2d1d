use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::images::{is_placeholder_image, is_valid_image_url, resolve_image};

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub url: Option<String>,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedImage {
    pub url: String,
    pub valid: bool,
    pub placeholder: bool,
}

/// GET /api/images/resolve?url=&alt=
pub async fn resolve(Query(query): Query<ResolveQuery>) -> Json<ResolvedImage> {
    let valid = query.url.as_deref().is_some_and(is_valid_image_url);
    let url = resolve_image(query.url.as_deref(), &query.alt);
    Json(ResolvedImage {
        placeholder: is_placeholder_image(&url),
        valid,
        url,
    })
}
