use axum::{extract::State, http::header, response::IntoResponse};

use crate::content::{
    model::{BlogPost, Project},
    service,
};
use crate::error::AppResult;
use crate::sitemap::sitemap_xml;
use crate::state::AppState;

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let fallback = state.config.sample_fallback;
    let (projects, _) = service::load_public::<Project>(&state.store, fallback).await?;
    let (posts, _) = service::load_public::<BlogPost>(&state.store, fallback).await?;

    let xml = sitemap_xml(&state.config.site_url, &projects, &posts);
    Ok((
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    ))
}
