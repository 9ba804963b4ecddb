use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use quote_catalog::{OptionSelection, ProductDetails};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/product-details", post(product_details))
}

/// POST /api/product-details
/// Resolves the four selected ids to a product. 400 when an id is missing,
/// 404 when the combination does not exist.
pub async fn product_details(
    State(state): State<AppState>,
    body: Result<Json<OptionSelection>, JsonRejection>,
) -> Result<Json<ProductDetails>, AppError> {
    let Json(selection) = body?;
    debug!("Product lookup for {:?}", selection.product_key());
    let product = state.service.product_details(&selection).await?;
    Ok(Json(product))
}
