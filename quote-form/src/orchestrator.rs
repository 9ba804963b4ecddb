use std::sync::Arc;

use quote_catalog::{OptionId, SelectionField};
use tokio::sync::Mutex;
use tracing::debug;

use crate::backend::QuoteBackend;
use crate::controller::{FormError, QuoteForm};
use crate::models::SubmitStatus;

/// Drives a [`QuoteForm`] against a [`QuoteBackend`].
///
/// The form lock is never held across a backend call, so several lookups can
/// be in flight at once; the form's fetch tickets decide which result wins.
pub struct QuoteSession {
    backend: Arc<dyn QuoteBackend>,
    form: Mutex<QuoteForm>,
}

impl QuoteSession {
    pub fn new(backend: Arc<dyn QuoteBackend>) -> Self {
        Self {
            backend,
            form: Mutex::new(QuoteForm::new()),
        }
    }

    /// Copy of the current form state.
    pub async fn snapshot(&self) -> QuoteForm {
        self.form.lock().await.clone()
    }

    /// Runs a synchronous edit (dimensions, quantity, contact fields).
    pub async fn update<R>(&self, edit: impl FnOnce(&mut QuoteForm) -> R) -> R {
        let mut form = self.form.lock().await;
        edit(&mut form)
    }

    pub async fn load_options(&self) {
        let result = self.backend.fetch_options().await;
        self.form.lock().await.receive_options(result);
    }

    /// Changes one option and, when that requires it, looks the product up.
    ///
    /// Returns `true` when a lookup result was applied to the form.
    pub async fn select(&self, field: SelectionField, value: impl Into<OptionId>) -> bool {
        let ticket = self.form.lock().await.set_selection(field, value);
        let Some(ticket) = ticket else {
            return false;
        };

        let result = self.backend.fetch_product_details(&ticket.selection).await;
        let applied = self.form.lock().await.receive_product_details(&ticket, result);
        if !applied {
            debug!("Lookup for generation {} superseded", ticket.generation);
        }
        applied
    }

    /// Sends the quote. Form-level problems come back as errors; the backend
    /// outcome is reported through the returned status.
    pub async fn submit(&self) -> Result<SubmitStatus, FormError> {
        let request = self.form.lock().await.prepare_submission()?;
        let result = self.backend.submit_quote(&request).await;

        let mut form = self.form.lock().await;
        form.receive_submission(result);
        form.submit_status()
            .cloned()
            .ok_or_else(|| FormError::Validation("Submission produced no status".to_string()))
    }
}
