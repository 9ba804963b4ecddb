use async_trait::async_trait;
use quote_catalog::{OptionCatalog, OptionSelection, ProductDetails};
use quote_core::QuoteRequest;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    /// No product exists for the requested combination.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Acknowledgement of an accepted quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteAck {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub quote_id: Option<Uuid>,
}

/// Remote collaborator the quote form talks to.
#[async_trait]
pub trait QuoteBackend: Send + Sync {
    async fn fetch_options(&self) -> Result<OptionCatalog, BackendError>;

    async fn fetch_product_details(
        &self,
        selection: &OptionSelection,
    ) -> Result<ProductDetails, BackendError>;

    async fn submit_quote(&self, request: &QuoteRequest) -> Result<QuoteAck, BackendError>;
}
