use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use quote_core::{Notification, QuoteReceipt, QuoteRequest};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/quotes", post(submit_quote))
        .route("/api/notifications", get(list_notifications))
}

/// POST /api/quotes
pub async fn submit_quote(
    State(state): State<AppState>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<QuoteReceipt>), AppError> {
    let Json(request) = body?;
    let receipt = state.service.submit_quote(&request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/notifications
/// Admin feed of quote arrivals, newest first.
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.service.notifications().await?))
}
