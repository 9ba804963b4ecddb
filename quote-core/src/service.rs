use std::sync::Arc;

use chrono::Utc;
use quote_catalog::{OptionCatalog, OptionSelection, ProductDetails, SelectionField};
use quote_shared::{QuoteOptionNames, QuoteSubmittedEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::notifier::SalesNotifier;
use crate::quote::{NewQuote, Notification, QuoteRequest};
use crate::repository::{CatalogRepository, QuoteRepository};
use crate::{CoreError, CoreResult};

/// Name used in sales alerts when an option id cannot be resolved.
pub const UNKNOWN_OPTION_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteReceipt {
    pub quote_id: Uuid,
    pub message: String,
}

/// Backend use cases behind the quote widget.
#[derive(Clone)]
pub struct QuoteService {
    catalog: Arc<dyn CatalogRepository>,
    quotes: Arc<dyn QuoteRepository>,
    notifier: Arc<dyn SalesNotifier>,
}

impl QuoteService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        quotes: Arc<dyn QuoteRepository>,
        notifier: Arc<dyn SalesNotifier>,
    ) -> Self {
        Self {
            catalog,
            quotes,
            notifier,
        }
    }

    pub async fn options(&self) -> CoreResult<OptionCatalog> {
        Ok(self.catalog.list_options().await?)
    }

    /// Resolves a complete selection to its product.
    pub async fn product_details(&self, selection: &OptionSelection) -> CoreResult<ProductDetails> {
        let product_id = selection.product_key().ok_or_else(|| {
            let missing: Vec<&str> = selection
                .missing_fields()
                .into_iter()
                .map(SelectionField::key)
                .collect();
            CoreError::ValidationError(format!(
                "Missing one or more selections: {}",
                missing.join(", ")
            ))
        })?;

        self.catalog
            .find_product(&product_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("No product matches combination {}", product_id)))
    }

    /// Persists a quote, records an admin notification and alerts sales.
    ///
    /// A failed sales alert is logged and does not fail the submission.
    pub async fn submit_quote(&self, request: &QuoteRequest) -> CoreResult<QuoteReceipt> {
        request.validate()?;

        let record = self.quotes.create_quote(&NewQuote::from(request)).await?;
        info!(
            "Quote {} saved for product {} (customer phone {})",
            record.id, record.quote.product_id, record.quote.customer_phone
        );

        let event = QuoteSubmittedEvent {
            quote_id: record.id,
            customer_name: record.quote.customer_name.clone(),
            customer_phone: record.quote.customer_phone.clone(),
            product_id: record.quote.product_id.clone(),
            options: self.resolve_option_names(&request.selection()).await,
            actual_width: record.quote.actual_width,
            actual_height: record.quote.actual_height,
            actual_depth: record.quote.actual_depth,
            quantity: record.quote.quantity,
            total_price: record.quote.total_price,
            submitted_at: Utc::now(),
        };

        self.quotes
            .create_notification(record.id, &event.headline())
            .await?;

        if let Err(e) = self.notifier.notify(&event).await {
            warn!("Failed to notify sales about quote {}: {}", record.id, e);
        }

        Ok(QuoteReceipt {
            quote_id: record.id,
            message: "Quote saved, notification created and sales notified.".to_string(),
        })
    }

    /// Admin notifications, newest first.
    pub async fn notifications(&self) -> CoreResult<Vec<Notification>> {
        Ok(self.quotes.list_notifications().await?)
    }

    async fn resolve_option_names(&self, selection: &OptionSelection) -> QuoteOptionNames {
        let mut names = [
            UNKNOWN_OPTION_NAME.to_string(),
            UNKNOWN_OPTION_NAME.to_string(),
            UNKNOWN_OPTION_NAME.to_string(),
            UNKNOWN_OPTION_NAME.to_string(),
        ];

        for (slot, field) in names.iter_mut().zip(SelectionField::ALL) {
            let Some(id) = selection.get(field) else {
                continue;
            };
            match self.catalog.option_name(field, id).await {
                Ok(Some(name)) => *slot = name,
                Ok(None) => {}
                Err(e) => warn!("Could not resolve {} {}: {}", field.key(), id, e),
            }
        }

        let [aluminum, handle, glass, part] = names;
        QuoteOptionNames {
            aluminum,
            handle,
            glass,
            part,
        }
    }
}
