pub mod quote;
pub mod repository;
pub mod notifier;
pub mod service;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Repository(#[from] repository::RepositoryError),
}

pub type CoreResult<T> = Result<T, CoreError>;

pub use quote::{CustomerInfo, NewQuote, Notification, QuoteRecord, QuoteRequest};
pub use service::{QuoteReceipt, QuoteService};
