use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use std::net::SocketAddr;

use crate::contact::{self, ContactMessage};
use crate::error::{AppError, AppResult, SuccessResponse};
use crate::state::AppState;

/// POST /api/contact
pub async fn send_message(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(msg): Json<ContactMessage>,
) -> AppResult<Json<SuccessResponse>> {
    msg.validate()?;

    let ip = addr.ip().to_string();
    if !state.contact_limiter.check(&ip).await {
        tracing::warn!(ip = %ip, "Contact form rate limited");
        return Err(AppError::RateLimited);
    }

    // A failed delivery does not count against the sender.
    if let Err(e) = contact::send(&state.config.email, &msg).await {
        state.contact_limiter.release(&ip).await;
        return Err(e);
    }
    Ok(Json(SuccessResponse { success: true }))
}
