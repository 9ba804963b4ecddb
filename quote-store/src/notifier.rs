use std::time::Duration;

use async_trait::async_trait;
use quote_core::notifier::{NotifyError, SalesNotifier};
use quote_shared::QuoteSubmittedEvent;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

const ALERT_SUBJECT: &str = "New quote request";

/// Writes sales alerts to the log. Used when no transport is configured.
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl SalesNotifier for LogNotifier {
    async fn notify(&self, event: &QuoteSubmittedEvent) -> Result<(), NotifyError> {
        // Phone stays masked here; the full body only goes out through real transports.
        info!(
            recipient = %self.recipient,
            quote_id = %event.quote_id,
            phone = %event.customer_phone,
            "{}: {} ({} x{}, total {})",
            ALERT_SUBJECT,
            event.headline(),
            event.product_id,
            event.quantity,
            event.total_price
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: &'static str,
    recipient: Option<&'a str>,
    text: String,
    quote: &'a QuoteSubmittedEvent,
}

/// POSTs sales alerts as JSON to a webhook (chat bridge, mail relay, ...).
pub struct WebhookNotifier {
    client: Client,
    url: String,
    recipient: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, recipient: Option<String>) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            recipient,
        })
    }
}

#[async_trait]
impl SalesNotifier for WebhookNotifier {
    async fn notify(&self, event: &QuoteSubmittedEvent) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            subject: ALERT_SUBJECT,
            recipient: self.recipient.as_deref(),
            text: event.render_body(),
            quote: event,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(format!("webhook answered {}", status)));
        }
        info!("Sales notified about quote {}", event.quote_id);
        Ok(())
    }
}
