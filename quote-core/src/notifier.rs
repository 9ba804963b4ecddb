use async_trait::async_trait;
use quote_shared::QuoteSubmittedEvent;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification transport failed: {0}")]
    Transport(String),
    #[error("Notification rejected by receiver: {0}")]
    Rejected(String),
}

/// Delivers new-quote alerts to the sales team.
#[async_trait]
pub trait SalesNotifier: Send + Sync {
    async fn notify(&self, event: &QuoteSubmittedEvent) -> Result<(), NotifyError>;
}
