use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::pii::Masked;

/// Display names of the four options a quote was requested for.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Default, PartialEq)]
pub struct QuoteOptionNames {
    pub aluminum: String,
    pub handle: String,
    pub glass: String,
    pub part: String,
}

/// Emitted once a quote has been persisted, consumed by sales notifiers.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct QuoteSubmittedEvent {
    pub quote_id: Uuid,
    pub customer_name: String,
    pub customer_phone: Masked<String>,
    pub product_id: String,
    pub options: QuoteOptionNames,
    pub actual_width: f64,
    pub actual_height: f64,
    pub actual_depth: f64,
    pub quantity: u32,
    pub total_price: f64,
    pub submitted_at: DateTime<Utc>,
}

impl QuoteSubmittedEvent {
    /// Short, single-line summary stored alongside the quote as a notification.
    pub fn headline(&self) -> String {
        format!("Customer {} requested a quote.", self.customer_name)
    }

    /// Plain-text body for the sales team.
    pub fn render_body(&self) -> String {
        format!(
            "New quote request\n\
             Sent at: {}\n\
             Customer: {}\n\
             Phone: {}\n\
             Product: {}\n\
             - Aluminum: {}\n\
             - Handle: {}\n\
             - Glass: {}\n\
             - Part: {}\n\
             - Size: {} x {} x {}\n\
             - Quantity: {}\n\
             - Total: {}",
            self.submitted_at.format("%d/%m/%Y %H:%M:%S"),
            self.customer_name,
            self.customer_phone.expose(),
            self.product_id,
            self.options.aluminum,
            self.options.handle,
            self.options.glass,
            self.options.part,
            self.actual_width,
            self.actual_height,
            self.actual_depth,
            self.quantity,
            self.total_price,
        )
    }
}
