use async_trait::async_trait;
use quote_catalog::{OptionCatalog, OptionId, ProductDetails, SelectionField};
use uuid::Uuid;

use crate::quote::{NewQuote, Notification, QuoteRecord};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to the option tables and the product matrix.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_options(&self) -> RepositoryResult<OptionCatalog>;

    /// Product stored under the concatenated selection key.
    async fn find_product(&self, product_id: &str) -> RepositoryResult<Option<ProductDetails>>;

    async fn option_name(
        &self,
        field: SelectionField,
        id: &OptionId,
    ) -> RepositoryResult<Option<String>>;
}

/// Persistence for submitted quotes and their admin notifications.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create_quote(&self, quote: &NewQuote) -> RepositoryResult<QuoteRecord>;

    async fn get_quote(&self, id: Uuid) -> RepositoryResult<Option<QuoteRecord>>;

    async fn create_notification(
        &self,
        quote_id: Uuid,
        message: &str,
    ) -> RepositoryResult<Notification>;

    async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>>;
}
