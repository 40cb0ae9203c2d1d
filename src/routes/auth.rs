/**
 * Authentication Routes
 * Admin login, token verification, refresh rotation and logout
 */
use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bcrypt::verify;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::auth::{
    clear_session_cookie, cookie_value, create_access_token, create_session_token, extract_bearer_token,
    session_claims, session_cookie, verify_live_token, verify_token, Claims, TokenKind, SESSION_COOKIE,
};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub role: String,
}

impl From<Claims> for UserInfo {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.sub,
            role: claims.role,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub user: Option<UserInfo>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResponse {
    fn failed(status: StatusCode, error: &str) -> Response {
        (
            status,
            Json(LoginResponse {
                error: Some(error.to_string()),
                ..Default::default()
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub is_valid: bool,
    pub user: Option<UserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
/// Check the admin credentials, return tokens and set the session cookie
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let ip = addr.ip().to_string();

    if !state.login_limiter.check(&ip).await {
        tracing::warn!(ip = %ip, "Login rate limited");
        return LoginResponse::failed(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests. Please try again later.",
        );
    }

    if payload.email.is_empty() || payload.password.is_empty() {
        return LoginResponse::failed(StatusCode::BAD_REQUEST, "Email and password are required");
    }

    if !payload.email.contains('@') {
        return LoginResponse::failed(StatusCode::BAD_REQUEST, "Invalid email format");
    }

    let config = state.config.clone();
    let email_matches = payload.email.to_lowercase() == config.admin_email.to_lowercase();

    // bcrypt is CPU-bound; keep the async executor free.
    let password = payload.password.clone();
    let hash = config.admin_password_hash.clone();
    let password_matches = tokio::task::spawn_blocking(move || verify(&password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false);

    if !email_matches || !password_matches {
        tracing::warn!(email = %payload.email, ip = %ip, "Failed login attempt");
        return LoginResponse::failed(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let email = config.admin_email.clone();
    let tokens = create_access_token(&config.jwt_secret, &email)
        .and_then(|access| create_session_token(&config.jwt_secret, &email).map(|session| (access, session)));
    let (access_token, session_token) = match tokens {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to create token: {}", e);
            return LoginResponse::failed(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create token");
        }
    };

    let refresh_token = state.refresh_tokens.issue(&email).await;

    tracing::info!(email = %email, ip = %ip, "Successful admin login");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&session_token))],
        Json(LoginResponse {
            success: true,
            user: Some(UserInfo {
                email,
                role: crate::auth::ADMIN_ROLE.to_string(),
            }),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            error: None,
        }),
    )
        .into_response()
}

/// POST /api/auth/verify
/// Verify the bearer access token (or the session cookie) and return the admin
pub async fn verify_session(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let result = match extract_bearer_token(&headers) {
        Some(token) => verify_live_token(&state, &token, TokenKind::Access).await,
        None => session_claims(&state, &headers).await,
    };

    let body = match result {
        Some(claims) => VerifyResponse {
            success: true,
            is_valid: true,
            user: Some(claims.into()),
            error: None,
        },
        None => VerifyResponse {
            success: false,
            is_valid: false,
            user: None,
            error: Some("Invalid or expired token".to_string()),
        },
    };
    (StatusCode::OK, Json(body))
}

/// POST /api/auth/refresh
/// Exchange a refresh token for a new access token; the refresh token is rotated
pub async fn refresh(State(state): State<AppState>, Json(payload): Json<RefreshRequest>) -> impl IntoResponse {
    if payload.refresh_token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RefreshResponse {
                error: Some("Refresh token is required".to_string()),
                ..Default::default()
            }),
        );
    }

    let Some((email, new_refresh_token)) = state.refresh_tokens.rotate(&payload.refresh_token).await else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(RefreshResponse {
                error: Some("Invalid or expired refresh token".to_string()),
                ..Default::default()
            }),
        );
    };

    match create_access_token(&state.config.jwt_secret, &email) {
        Ok(access_token) => (
            StatusCode::OK,
            Json(RefreshResponse {
                success: true,
                access_token: Some(access_token),
                refresh_token: Some(new_refresh_token),
                error: None,
            }),
        ),
        Err(e) => {
            tracing::error!("Failed to create access token: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RefreshResponse {
                    error: Some("Failed to create token".to_string()),
                    ..Default::default()
                }),
            )
        }
    }
}

/// POST /api/auth/logout
/// Revoke the presented tokens and clear the session cookie. Always succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<LogoutRequest>>,
) -> impl IntoResponse {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let secret = &state.config.jwt_secret;

    if let Some(refresh_token) = payload.refresh_token {
        state.refresh_tokens.revoke(&refresh_token).await;
    }

    // The presented access and session tokens stop working now, not at expiry.
    let presented = [
        (extract_bearer_token(&headers), TokenKind::Access),
        (cookie_value(&headers, SESSION_COOKIE), TokenKind::Session),
    ];
    let mut owner: Option<Claims> = None;
    for (token, kind) in presented {
        let Some(token) = token else { continue };
        if let Ok(claims) = verify_token(secret, &token, kind) {
            state.revoked_tokens.revoke(&token, claims.exp).await;
            owner.get_or_insert(claims);
        }
    }
    if let Some(claims) = owner {
        state.refresh_tokens.revoke_all(&claims.sub).await;
        tracing::info!(email = %claims.sub, "Admin logged out");
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(LogoutResponse { success: true }),
    )
}
