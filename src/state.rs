use std::sync::Arc;

use crate::auth::{RateLimiter, RefreshTokens, RevokedTokens};
use crate::config::AppConfig;
use crate::db::DocumentStore;
use crate::github::GitHubClient;
use crate::perf::ImageMetrics;
use crate::storage::Storage;

/// Login attempts allowed per IP: one per minute.
pub const LOGIN_WINDOW_SECS: i64 = 60;
/// Contact form submissions allowed per IP.
pub const CONTACT_WINDOW_SECS: i64 = 30;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: DocumentStore,
    pub storage: Storage,
    pub github: GitHubClient,
    pub refresh_tokens: RefreshTokens,
    pub revoked_tokens: RevokedTokens,
    pub login_limiter: RateLimiter,
    pub contact_limiter: RateLimiter,
    pub image_metrics: ImageMetrics,
}

impl AppState {
    pub fn new(config: AppConfig, store: DocumentStore) -> Self {
        let github = GitHubClient::new(
            config.github.username.clone(),
            config.github.token.clone(),
            config.github.api_url.clone(),
        );
        Self {
            storage: Storage::new(config.upload_dir.clone()),
            github,
            store,
            refresh_tokens: RefreshTokens::default(),
            revoked_tokens: RevokedTokens::default(),
            login_limiter: RateLimiter::new(LOGIN_WINDOW_SECS),
            contact_limiter: RateLimiter::new(CONTACT_WINDOW_SECS),
            image_metrics: ImageMetrics::default(),
            config: Arc::new(config),
        }
    }

    /// Memory store and no rate limits.
    pub fn for_tests() -> Self {
        Self {
            login_limiter: RateLimiter::disabled(),
            contact_limiter: RateLimiter::disabled(),
            ..Self::new(AppConfig::for_tests(), DocumentStore::memory())
        }
    }
}
