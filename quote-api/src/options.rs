use axum::{extract::State, routing::get, Json, Router};
use quote_catalog::OptionCatalog;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/options", get(list_options))
}

/// GET /api/options
/// The four option lists the widget's dropdowns are filled from.
pub async fn list_options(State(state): State<AppState>) -> Result<Json<OptionCatalog>, AppError> {
    let options = state.service.options().await?;
    Ok(Json(options))
}
