//! Redirects for the admin pages of the static site.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use percent_encoding::percent_decode_str;

use super::{clear_session_cookie, session_claims};
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    Redirect {
        location: &'static str,
        clear_cookie: bool,
    },
}

/// The path as the file server resolves it: percent-decoded, with empty and
/// `.` segments dropped. `/%61dmin//dashboard/` becomes `/admin/dashboard`.
pub fn canonical_path(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let segments: Vec<&str> = decoded
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    format!("/{}", segments.join("/"))
}

fn is_admin_path(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/")
}

fn is_login_path(path: &str) -> bool {
    path.trim_end_matches('/') == LOGIN_PATH
}

fn has_bypass(query: Option<&str>) -> bool {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).any(|(k, v)| k == "bypass" && v == "true"))
        .unwrap_or(false)
}

pub fn guard_decision(path: &str, query: Option<&str>, session_valid: bool, environment: &str) -> GuardDecision {
    let path = &canonical_path(path);
    if !is_admin_path(path) {
        return GuardDecision::Continue;
    }
    if is_login_path(path) {
        if session_valid {
            return GuardDecision::Redirect {
                location: DASHBOARD_PATH,
                clear_cookie: false,
            };
        }
        return GuardDecision::Continue;
    }

    if session_valid || (environment == "development" && has_bypass(query)) {
        GuardDecision::Continue
    } else {
        GuardDecision::Redirect {
            location: LOGIN_PATH,
            clear_cookie: true,
        }
    }
}

/// Applies [`guard_decision`] in front of the static site.
pub async fn page_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let headers = req.headers().clone();
    let session_valid = session_claims(&state, &headers).await.is_some();
    let decision = guard_decision(
        req.uri().path(),
        req.uri().query(),
        session_valid,
        &state.config.environment,
    );

    match decision {
        GuardDecision::Continue => next.run(req).await,
        GuardDecision::Redirect {
            location,
            clear_cookie,
        } => {
            tracing::debug!(from = %req.uri().path(), to = location, "Admin page redirect");
            let mut response = (
                StatusCode::TEMPORARY_REDIRECT,
                [(header::LOCATION, HeaderValue::from_static(location))],
            )
                .into_response();
            if clear_cookie {
                if let Ok(value) = HeaderValue::from_str(&clear_session_cookie()) {
                    response.headers_mut().insert(header::SET_COOKIE, value);
                }
            }
            response
        }
    }
}
