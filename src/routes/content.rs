/**
 * Content Routes
 * Public read endpoints for projects, blog posts, services, testimonials and the profile
 */
use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{
    model::{BlogPost, Profile, Project, Service, Testimonial},
    query, sample, service, ContentSource, Document, Listing,
};
use crate::error::{AppError, AppResult};
use crate::images::{self, PlaceholderKind};
use crate::schema;
use crate::state::AppState;

pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/projects
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub featured: Option<bool>,
}

/// Query parameters for GET /api/blog
#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
}

/// Response for GET /api/projects/{id}
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub schema: Value,
    pub source: ContentSource,
}

/// Response for GET /api/blog/{slug}
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub source: ContentSource,
}

/// Response for the category and tag lists
#[derive(Debug, Serialize)]
pub struct FilterValues {
    pub items: Vec<String>,
    pub source: ContentSource,
}

// ============================================================================
// Helpers
// ============================================================================

fn with_source<T: Serialize>(source: ContentSource, body: T) -> Response {
    (
        [(
            HeaderName::from_static(CONTENT_SOURCE_HEADER),
            HeaderValue::from_static(source.as_str()),
        )],
        Json(body),
    )
        .into_response()
}

fn listing<T: Serialize>(items: Vec<T>, source: ContentSource) -> Response {
    with_source(source, Listing::new(items, source))
}

async fn load<T: Document>(state: &AppState) -> AppResult<(Vec<T>, ContentSource)> {
    service::load_public::<T>(&state.store, state.config.sample_fallback).await
}

fn present_project(mut project: Project) -> Project {
    project.image_url =
        images::resolve_project_image(Some(&project.image_url), PlaceholderKind::from_alt(&project.title));
    project
}

fn present_post(mut post: BlogPost) -> BlogPost {
    post.cover_image = images::resolve_blog_image(Some(&post.cover_image));
    post
}

fn present_testimonial(mut testimonial: Testimonial) -> Testimonial {
    let usable = testimonial
        .avatar_url
        .as_deref()
        .is_some_and(images::is_valid_image_url);
    if !usable {
        testimonial.avatar_url = Some(images::avatar_placeholder(&testimonial.name));
    }
    testimonial
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/projects?category=&q=&featured=
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectQuery>,
) -> AppResult<Response> {
    let (items, source) = load::<Project>(&state).await?;
    let items = query::filter_projects(items, params.category.as_deref(), params.q.as_deref(), params.featured)
        .into_iter()
        .map(present_project)
        .collect();
    Ok(listing(items, source))
}

/// GET /api/projects/categories
pub async fn project_categories(State(state): State<AppState>) -> AppResult<Response> {
    let (items, source) = load::<Project>(&state).await?;
    Ok(with_source(
        source,
        FilterValues {
            items: query::project_categories(&items),
            source,
        },
    ))
}

/// GET /api/projects/{id}
/// The project plus its schema.org description
pub async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let (items, source) = load::<Project>(&state).await?;
    let project = items
        .into_iter()
        .find(|p| p.id == id)
        .map(present_project)
        .ok_or_else(|| AppError::not_found(Project::LABEL))?;

    let author = sample::profile().about.name;
    let schema = schema::project_schema(&project, &state.config.site_url, &author);
    Ok(with_source(
        source,
        ProjectDetail {
            project,
            schema,
            source,
        },
    ))
}

/// GET /api/blog?tag=&q=
pub async fn list_posts(State(state): State<AppState>, Query(params): Query<BlogQuery>) -> AppResult<Response> {
    let (items, source) = load::<BlogPost>(&state).await?;
    let items = query::filter_posts(items, params.tag.as_deref(), params.q.as_deref())
        .into_iter()
        .map(present_post)
        .collect();
    Ok(listing(items, source))
}

/// GET /api/blog/tags
pub async fn post_tags(State(state): State<AppState>) -> AppResult<Response> {
    let (items, source) = load::<BlogPost>(&state).await?;
    Ok(with_source(
        source,
        FilterValues {
            items: query::blog_tags(&items),
            source,
        },
    ))
}

/// GET /api/blog/{slug}
pub async fn get_post(State(state): State<AppState>, Path(slug): Path<String>) -> AppResult<Response> {
    let (items, source) = load::<BlogPost>(&state).await?;
    let post = query::find_post_by_slug(items, &slug)
        .map(present_post)
        .ok_or_else(|| AppError::not_found(BlogPost::LABEL))?;
    Ok(with_source(source, PostDetail { post, source }))
}

/// GET /api/services
pub async fn list_services(State(state): State<AppState>) -> AppResult<Response> {
    let (items, source) = load::<Service>(&state).await?;
    Ok(listing(items, source))
}

/// GET /api/testimonials
/// Newest first; missing or unusable avatars get an initials placeholder
pub async fn list_testimonials(State(state): State<AppState>) -> AppResult<Response> {
    let (mut items, source) = load::<Testimonial>(&state).await?;
    query::sort_testimonials_newest_first(&mut items);
    let items = items.into_iter().map(present_testimonial).collect();
    Ok(listing(items, source))
}

/// GET /api/profile
pub async fn get_profile() -> Json<Profile> {
    let mut profile = sample::profile();
    profile.about.profile_image = images::resolve_image(Some(&profile.about.profile_image), &profile.about.name);
    Json(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;
    use tower::ServiceExt;

    fn content_router(state: AppState) -> Router {
        Router::new()
            .route("/api/projects", get(list_projects))
            .route("/api/projects/categories", get(project_categories))
            .route("/api/projects/{id}", get(get_project))
            .route("/api/blog", get(list_posts))
            .route("/api/blog/tags", get(post_tags))
            .route("/api/blog/{slug}", get(get_post))
            .route("/api/services", get(list_services))
            .route("/api/testimonials", get(list_testimonials))
            .route("/api/profile", get(get_profile))
            .with_state(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Option<String>, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let source = res
            .headers()
            .get(CONTENT_SOURCE_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, source, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_empty_store_serves_sample_projects() {
        let (status, source, body) = get_json(content_router(AppState::for_tests()), "/api/projects").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.as_deref(), Some("sample"));
        assert_eq!(body["source"], "sample");
        assert_eq!(body["total"], sample::projects().len());
    }

    #[tokio::test]
    async fn test_store_content_wins_over_sample() {
        let state = AppState::for_tests();
        service::create::<Project>(
            &state.store,
            json!({
                "title": "Inventory API",
                "description": "Stock tracking service",
                "category": "Backend",
                "imageUrl": "not an image"
            }),
        )
        .await
        .unwrap();

        let (_, source, body) = get_json(content_router(state), "/api/projects").await;
        assert_eq!(source.as_deref(), Some("store"));
        assert_eq!(body["total"], 1);
        assert_eq!(
            body["items"][0]["imageUrl"],
            images::project_placeholder(PlaceholderKind::Other)
        );
    }

    #[tokio::test]
    async fn test_fallback_disabled_returns_empty_listing() {
        let mut state = AppState::for_tests();
        std::sync::Arc::make_mut(&mut state.config).sample_fallback = false;
        let (status, source, body) = get_json(content_router(state), "/api/services").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.as_deref(), Some("store"));
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn test_offline_store_without_fallback_is_an_error() {
        let mut state = AppState::for_tests();
        std::sync::Arc::make_mut(&mut state.config).sample_fallback = false;
        if let crate::db::DocumentStore::Memory(memory) = &state.store {
            memory.set_offline(true);
        }
        let req = Request::get("/api/services").body(Body::empty()).unwrap();
        let res = content_router(state).oneshot(req).await.unwrap();
        assert!(res.status().is_server_error());
    }

    #[tokio::test]
    async fn test_filter_projects_by_category() {
        let (_, _, body) = get_json(
            content_router(AppState::for_tests()),
            "/api/projects?category=WordPress",
        )
        .await;
        let items = body["items"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items.iter().all(|p| p["category"] == "WordPress"));
    }

    #[tokio::test]
    async fn test_categories_start_with_all() {
        let (_, _, body) = get_json(content_router(AppState::for_tests()), "/api/projects/categories").await;
        assert_eq!(body["items"][0], "All");
    }

    #[tokio::test]
    async fn test_project_detail_has_schema() {
        let (status, _, body) = get_json(content_router(AppState::for_tests()), "/api/projects/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "1");
        assert_eq!(body["schema"]["@type"], "SoftwareApplication");
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let (status, _, body) = get_json(content_router(AppState::for_tests()), "/api/projects/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Project not found");
    }

    #[tokio::test]
    async fn test_blog_listing_newest_first() {
        let (_, _, body) = get_json(content_router(AppState::for_tests()), "/api/blog").await;
        let dates: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["date"].as_str().unwrap())
            .collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_blog_post_by_slug() {
        let slug = sample::blog_posts()[0].slug.clone();
        let (status, _, body) =
            get_json(content_router(AppState::for_tests()), &format!("/api/blog/{slug}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], slug);

        let (status, _, _) = get_json(content_router(AppState::for_tests()), "/api/blog/no-such-post").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_testimonial_without_avatar_gets_placeholder() {
        let state = AppState::for_tests();
        service::create::<Testimonial>(
            &state.store,
            json!({
                "name": "Ada Obi",
                "company": "Acme",
                "content": "Delivered on time."
            }),
        )
        .await
        .unwrap();

        let (_, _, body) = get_json(content_router(state), "/api/testimonials").await;
        let avatar = body["items"][0]["avatarUrl"].as_str().unwrap();
        assert!(avatar.starts_with("data:image/svg+xml,"));
        assert!(images::is_placeholder_image(avatar));
    }

    #[tokio::test]
    async fn test_profile() {
        let (status, _, body) = get_json(content_router(AppState::for_tests()), "/api/profile").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["about"]["name"], sample::profile().about.name);
    }
}
