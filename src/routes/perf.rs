use axum::{
    extract::Query,
    http::{header, HeaderName},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::perf::critical_css::{critical_css, minify_css, preload_tags, should_inline, CriticalCssConfig};

pub const INLINE_HEADER: &str = "x-critical-inline";

#[derive(Debug, Deserialize)]
pub struct CriticalCssQuery {
    #[serde(default = "default_route")]
    pub route: String,
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_route() -> String {
    "/".to_string()
}

fn default_minify() -> bool {
    true
}

/// GET /api/critical-css?route=&minify=
/// `x-critical-inline` tells the page builder whether to inline the result.
pub async fn get_critical_css(Query(query): Query<CriticalCssQuery>) -> impl IntoResponse {
    let css = critical_css(&query.route);
    let css = if query.minify { minify_css(&css) } else { css };
    let inline = should_inline(&css, &CriticalCssConfig::default());

    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8".to_string()),
            (HeaderName::from_static(INLINE_HEADER), inline.to_string()),
        ],
        css,
    )
}

/// GET /api/critical-css/preload
pub async fn get_preload_tags() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], preload_tags())
}
