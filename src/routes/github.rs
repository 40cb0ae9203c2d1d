/**
 * GitHub Routes
 * Repository list for the projects page, proxied so the token stays server-side
 */
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::ContentSource;
use crate::error::{AppError, AppResult};
use crate::github::{fallback_repos, GitHubError, GithubRepo};
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 6;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct RepoQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RepoListResponse {
    pub items: Vec<GithubRepo>,
    pub total: usize,
    pub source: ContentSource,
}

impl From<GitHubError> for AppError {
    fn from(e: GitHubError) -> Self {
        match e {
            GitHubError::NotConfigured => AppError::Unavailable(e.to_string()),
            GitHubError::Status(404) => AppError::not_found("Repository"),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// GET /api/github/repos?limit=
/// Falls back to a fixed list when GitHub cannot be reached
pub async fn list_repos(State(state): State<AppState>, Query(query): Query<RepoQuery>) -> Json<RepoListResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let (mut items, source) = match state.github.repositories(limit).await {
        Ok(repos) => (repos, ContentSource::Store),
        Err(e) => {
            tracing::warn!(error = %e, "Using fallback repositories");
            (fallback_repos(), ContentSource::Sample)
        }
    };
    items.truncate(limit as usize);

    Json(RepoListResponse {
        total: items.len(),
        items,
        source,
    })
}

/// GET /api/github/repos/{name}
pub async fn get_repo(State(state): State<AppState>, Path(name): Path<String>) -> AppResult<Json<GithubRepo>> {
    Ok(Json(state.github.repository(&name).await?))
}

/// GET /api/github/profile
pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<Value>> {
    Ok(Json(state.github.user_profile().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn github_router(state: AppState) -> Router {
        Router::new()
            .route("/api/github/repos", get(list_repos))
            .route("/api/github/repos/{name}", get(get_repo))
            .route("/api/github/profile", get(get_profile))
            .with_state(state)
    }

    fn state_for(server: &MockServer) -> AppState {
        let mut state = AppState::for_tests();
        state.github = GitHubClient::new(Some("octo".to_string()), None, server.uri());
        state
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn api_repo(id: u64, name: &str, fork: bool) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "html_url": format!("https://github.com/octo/{name}"),
            "homepage": null,
            "stargazers_count": 3,
            "language": "Rust",
            "fork": fork
        })
    }

    #[tokio::test]
    async fn test_repos_from_github() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([api_repo(1, "site", false), api_repo(2, "forked", true)])),
            )
            .mount(&server)
            .await;

        let (status, body) = get_json(github_router(state_for(&server)), "/api/github/repos?limit=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "store");
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["name"], "site");
        assert_eq!(body["items"][0]["description"], "");
    }

    #[tokio::test]
    async fn test_repos_fall_back_when_unconfigured() {
        let (status, body) = get_json(github_router(AppState::for_tests()), "/api/github/repos?limit=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "sample");
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_repos_fall_back_on_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_, body) = get_json(github_router(state_for(&server)), "/api/github/repos").await;
        assert_eq!(body["source"], "sample");
        assert_eq!(body["total"], fallback_repos().len());
    }

    #[tokio::test]
    async fn test_single_repo_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (status, _) = get_json(github_router(state_for(&server)), "/api/github/repos/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_unconfigured_is_unavailable() {
        let (status, body) = get_json(github_router(AppState::for_tests()), "/api/github/profile").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "GitHub username is not configured");
    }
}
