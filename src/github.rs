//! GitHub REST client for the repositories section.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("portfolio-site/", env!("CARGO_PKG_VERSION"));

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
});

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GitHub returned status {0}")]
    Status(u16),

    #[error("GitHub username is not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub fork: bool,
}

/// Repository as returned by the API.
#[derive(Debug, Deserialize)]
struct ApiRepo {
    id: u64,
    name: String,
    description: Option<String>,
    html_url: String,
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    language: Option<String>,
    #[serde(default)]
    fork: bool,
}

impl From<ApiRepo> for GithubRepo {
    fn from(repo: ApiRepo) -> Self {
        Self {
            id: repo.id.to_string(),
            name: repo.name,
            description: repo.description.unwrap_or_default(),
            html_url: repo.html_url,
            homepage: repo.homepage,
            stargazers_count: repo.stargazers_count,
            language: repo.language,
            fork: repo.fork,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    username: Option<String>,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    pub fn new(username: Option<String>, token: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            username,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn username(&self) -> Result<&str, GitHubError> {
        self.username.as_deref().ok_or(GitHubError::NotConfigured)
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<reqwest::Response, GitHubError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = HTTP_CLIENT
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "GitHub request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path = %path, status = %status, "GitHub returned error");
            return Err(GitHubError::Status(status.as_u16()));
        }
        Ok(response)
    }

    /// Public repositories, most recently updated first, forks removed.
    pub async fn repositories(&self, per_page: u32) -> Result<Vec<GithubRepo>, GitHubError> {
        let path = format!("/users/{}/repos", self.username()?);
        let query = [
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];
        let repos: Vec<ApiRepo> = self.get(&path, &query).await?.json().await?;
        Ok(repos
            .into_iter()
            .filter(|r| !r.fork)
            .map(GithubRepo::from)
            .collect())
    }

    pub async fn repository(&self, name: &str) -> Result<GithubRepo, GitHubError> {
        let path = format!("/repos/{}/{}", self.username()?, name);
        let repo: ApiRepo = self.get(&path, &[]).await?.json().await?;
        Ok(repo.into())
    }

    pub async fn user_profile(&self) -> Result<Value, GitHubError> {
        let path = format!("/users/{}", self.username()?);
        Ok(self.get(&path, &[]).await?.json().await?)
    }
}

/// Shown when GitHub is unreachable or returns nothing.
pub fn fallback_repos() -> Vec<GithubRepo> {
    let repo = |id: &str, name: &str, description: &str, homepage: &str, stars: u64, language: &str| GithubRepo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        html_url: format!("https://github.com/username/{name}"),
        homepage: Some(homepage.to_string()),
        stargazers_count: stars,
        language: Some(language.to_string()),
        fork: false,
    };
    vec![
        repo(
            "1",
            "react-portfolio",
            "Modern portfolio website built with React and Next.js",
            "https://portfolio-demo.com",
            48,
            "TypeScript",
        ),
        repo(
            "2",
            "e-commerce-platform",
            "Full-featured e-commerce platform with React and Node.js",
            "https://ecommerce-demo.com",
            124,
            "JavaScript",
        ),
        repo(
            "3",
            "wordpress-starter",
            "WordPress starter template with custom theme development",
            "",
            37,
            "PHP",
        ),
        repo(
            "4",
            "task-management-app",
            "Task management application with React and Firebase",
            "https://task-app-demo.com",
            62,
            "JavaScript",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_json(id: u64, name: &str, fork: bool, description: Value) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": description,
            "html_url": format!("https://github.com/octo/{name}"),
            "homepage": null,
            "stargazers_count": 3,
            "language": "Rust",
            "fork": fork
        })
    }

    #[tokio::test]
    async fn test_repositories_filters_forks_and_nulls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .and(query_param("sort", "updated"))
            .and(query_param("direction", "desc"))
            .and(query_param("per_page", "6"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                repo_json(1, "site", false, json!(null)),
                repo_json(2, "forked", true, json!("copy")),
                repo_json(3, "cli", false, json!("A tool")),
            ])))
            .mount(&server)
            .await;

        let client = GitHubClient::new(Some("octo".to_string()), None, server.uri());
        let repos = client.repositories(6).await.unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].id, "1");
        assert_eq!(repos[0].description, "");
        assert_eq!(repos[1].name, "cli");
        assert!(repos.iter().all(|r| !r.fork));
    }

    #[tokio::test]
    async fn test_token_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/cli"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json(
                3,
                "cli",
                false,
                json!("A tool"),
            )))
            .mount(&server)
            .await;

        let client = GitHubClient::new(Some("octo".to_string()), Some("secret".to_string()), server.uri());
        let repo = client.repository("cli").await.unwrap();
        assert_eq!(repo.description, "A tool");
    }

    #[tokio::test]
    async fn test_error_status_and_missing_username() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = GitHubClient::new(Some("octo".to_string()), None, server.uri());
        assert!(matches!(client.user_profile().await, Err(GitHubError::Status(403))));

        let anonymous = GitHubClient::new(None, None, server.uri());
        assert!(matches!(anonymous.repositories(5).await, Err(GitHubError::NotConfigured)));
    }

    #[test]
    fn test_fallback_repos() {
        let repos = fallback_repos();
        assert_eq!(repos.len(), 4);
        assert_eq!(repos[1].stargazers_count, 124);
    }
}
