/**
 * Admin authentication
 * JWT access/session tokens, rotating refresh tokens and the admin API gate
 */
pub mod guard;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Configuration
// ============================================================================

/// Access token expiry in minutes
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Session cookie and refresh token expiry in days
pub const SESSION_EXPIRY_DAYS: i64 = 7;

pub const SESSION_COOKIE: &str = "admin_auth_token";

pub const ADMIN_ROLE: &str = "ADMIN";

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived bearer token for API calls.
    Access,
    /// Long-lived token carried by the session cookie.
    Session,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

fn create_token(secret: &str, email: &str, kind: TokenKind, ttl: Duration) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        kind,
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn create_access_token(secret: &str, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(
        secret,
        email,
        TokenKind::Access,
        Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
    )
}

pub fn create_session_token(secret: &str, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
    create_token(
        secret,
        email,
        TokenKind::Session,
        Duration::days(SESSION_EXPIRY_DAYS),
    )
}

/// Decode a token and check it is of the expected kind.
pub fn verify_token(secret: &str, token: &str, kind: TokenKind) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    if data.claims.kind != kind {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(data.claims)
}

// ============================================================================
// Request helpers
// ============================================================================

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_EXPIRY_DAYS * 24 * 60 * 60
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Verify `token` and reject it if it was revoked at logout.
pub async fn verify_live_token(state: &AppState, token: &str, kind: TokenKind) -> Option<Claims> {
    let claims = verify_token(&state.config.jwt_secret, token, kind).ok()?;
    if state.revoked_tokens.is_revoked(token).await {
        tracing::debug!(admin = %claims.sub, "Rejected revoked token");
        return None;
    }
    Some(claims)
}

/// Claims of the session cookie, if it carries a live session token.
pub async fn session_claims(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    let token = cookie_value(headers, SESSION_COOKIE)?;
    verify_live_token(state, &token, TokenKind::Session).await
}

/// Resolve the admin from a bearer access token or the session cookie.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Claims, AppError> {
    if let Some(token) = extract_bearer_token(headers) {
        return verify_live_token(state, &token, TokenKind::Access)
            .await
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()));
    }
    session_claims(state, headers)
        .await
        .ok_or_else(|| AppError::Unauthorized("Authorization required".to_string()))
}

/// Middleware for `/api/admin/*`.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let headers = req.headers().clone();
    match authenticate(&state, &headers).await {
        Ok(claims) => {
            tracing::debug!(admin = %claims.sub, path = %req.uri().path(), "Admin request");
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), "Rejected unauthenticated admin request");
            e.into_response()
        }
    }
}

// ============================================================================
// Refresh tokens
// ============================================================================

#[derive(Debug, Clone)]
pub struct RefreshTokenData {
    pub email: String,
    pub expires_at: i64,
    pub revoked: bool,
}

/// Opaque refresh tokens, stored by SHA-256 hash. Lost on restart.
#[derive(Debug, Clone, Default)]
pub struct RefreshTokens {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenData>>>,
}

fn generate_refresh_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 64)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl RefreshTokens {
    pub async fn issue(&self, email: &str) -> String {
        let token = generate_refresh_token();
        let now = Utc::now().timestamp();
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, data| !data.revoked && data.expires_at > now);
        tokens.insert(
            hash_token(&token),
            RefreshTokenData {
                email: email.to_string(),
                expires_at: (Utc::now() + Duration::days(SESSION_EXPIRY_DAYS)).timestamp(),
                revoked: false,
            },
        );
        token
    }

    /// Revoke `token` and issue a replacement for the same admin.
    pub async fn rotate(&self, token: &str) -> Option<(String, String)> {
        let hash = hash_token(token);
        let now = Utc::now().timestamp();
        let email = {
            let mut tokens = self.tokens.write().await;
            let data = tokens.get_mut(&hash)?;
            if data.revoked || data.expires_at <= now {
                return None;
            }
            data.revoked = true;
            data.email.clone()
        };
        let new_token = self.issue(&email).await;
        Some((email, new_token))
    }

    pub async fn revoke(&self, token: &str) {
        let mut tokens = self.tokens.write().await;
        if let Some(data) = tokens.get_mut(&hash_token(token)) {
            data.revoked = true;
        }
    }

    pub async fn revoke_all(&self, email: &str) {
        let mut tokens = self.tokens.write().await;
        for data in tokens.values_mut() {
            if data.email == email {
                data.revoked = true;
            }
        }
    }
}

/// Access and session JWTs ended by logout, by hash, kept until they would
/// have expired anyway.
#[derive(Debug, Clone, Default)]
pub struct RevokedTokens {
    tokens: Arc<RwLock<HashMap<String, i64>>>,
}

impl RevokedTokens {
    pub async fn revoke(&self, token: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, exp| *exp > now);
        tokens.insert(hash_token(token), expires_at);
    }

    pub async fn is_revoked(&self, token: &str) -> bool {
        self.tokens.read().await.contains_key(&hash_token(token))
    }
}

// ============================================================================
// Rate limiting
// ============================================================================

/// One request per key per window. A zero window disables the limit.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    window_secs: i64,
    last_seen: Arc<RwLock<HashMap<String, i64>>>,
}

impl RateLimiter {
    pub fn new(window_secs: i64) -> Self {
        Self {
            window_secs,
            last_seen: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Records the attempt and reports whether it is allowed.
    pub async fn check(&self, key: &str) -> bool {
        if self.window_secs <= 0 {
            return true;
        }
        let now = Utc::now().timestamp();
        let mut limits = self.last_seen.write().await;

        // Keep memory proportional to active keys.
        limits.retain(|_, last| now - *last < self.window_secs);

        if limits.contains_key(key) {
            return false;
        }
        limits.insert(key.to_string(), now);
        true
    }

    /// Forget the attempt recorded for `key`.
    pub async fn release(&self, key: &str) {
        self.last_seen.write().await.remove(key);
    }
}
