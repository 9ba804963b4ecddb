use quote_catalog::{
    CurrencyFormat, OptionCatalog, OptionId, OptionSelection, PricingEngine, PricingResult,
    ProductDetails, SelectionField,
};
use quote_core::{CoreError, CustomerInfo, QuoteRequest};
use quote_shared::Masked;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, QuoteAck};
use crate::models::{Advisory, DimensionInputs, FetchTicket, PriceDisplay, SubmitStatus};

pub const SUBMIT_SUCCESS_MESSAGE: &str =
    "Your request has been sent! We will contact you as soon as possible.";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Sending the request failed. Please try again.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("No product selected yet")]
    NoProduct,
    #[error("{0}")]
    Validation(String),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
}

/// State of one visitor's quote session.
///
/// All mutation goes through the transition methods below; a product lookup
/// is requested by returning a [`FetchTicket`] and its result is fed back
/// through [`QuoteForm::receive_product_details`].
#[derive(Debug, Clone)]
pub struct QuoteForm {
    options: OptionCatalog,
    selection: OptionSelection,
    customer: CustomerInfo,
    product: Option<ProductDetails>,
    adjusted: DimensionInputs,
    quantity: String,
    generation: u64,
    lookup_in_flight: bool,
    submitting: bool,
    advisory: Option<Advisory>,
    submit_status: Option<SubmitStatus>,
    engine: PricingEngine,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteForm {
    pub fn new() -> Self {
        Self {
            options: OptionCatalog::default(),
            selection: OptionSelection::new(),
            customer: CustomerInfo::default(),
            product: None,
            adjusted: DimensionInputs::default(),
            quantity: "1".to_string(),
            generation: 0,
            lookup_in_flight: false,
            submitting: false,
            advisory: None,
            submit_status: None,
            engine: PricingEngine::new(),
        }
    }

    pub fn options(&self) -> &OptionCatalog {
        &self.options
    }

    pub fn receive_options(&mut self, result: Result<OptionCatalog, BackendError>) {
        match result {
            Ok(options) => self.options = options,
            Err(e) => {
                warn!("Option lists unavailable: {}", e);
                self.advisory = Some(Advisory::OptionsUnavailable);
            }
        }
    }

    pub fn selection(&self) -> &OptionSelection {
        &self.selection
    }

    /// Updates one option id.
    ///
    /// Returns a ticket when a product lookup has to be issued: the selection
    /// just became complete, an id changed while complete, or the previous
    /// lookup for this selection failed. Any displayed product is dropped in
    /// that case, and whenever the selection becomes incomplete.
    pub fn set_selection(
        &mut self,
        field: SelectionField,
        value: impl Into<OptionId>,
    ) -> Option<FetchTicket> {
        let before = self.selection.get(field).cloned();
        self.selection.set(field, value);
        let changed = before.as_ref() != self.selection.get(field);

        if !self.selection.is_complete() {
            if self.product.is_some() || self.lookup_in_flight {
                debug!("Selection incomplete, dropping product details");
            }
            self.invalidate_product();
            return None;
        }

        if !changed && (self.product.is_some() || self.lookup_in_flight) {
            return None;
        }

        self.invalidate_product();
        self.lookup_in_flight = true;
        self.advisory = None;
        debug!(
            "Requesting product details for {:?} (generation {})",
            self.selection.product_key(),
            self.generation
        );

        Some(FetchTicket {
            generation: self.generation,
            selection: self.selection.clone(),
        })
    }

    /// Applies a lookup result. Returns `false` when the ticket is stale and
    /// the result was discarded.
    pub fn receive_product_details(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ProductDetails, BackendError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale product response (generation {}, current {})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.lookup_in_flight = false;
        match result {
            Ok(product) => {
                self.adjusted = DimensionInputs::standard_of(&product);
                self.product = Some(product);
                self.advisory = None;
            }
            Err(BackendError::NotFound(msg)) => {
                info!("No product for {:?}: {}", ticket.selection.product_key(), msg);
                self.advisory = Some(Advisory::ProductNotFound);
            }
            Err(e) => {
                warn!("Product lookup failed: {}", e);
                self.advisory = Some(Advisory::LookupFailed);
            }
        }
        true
    }

    fn invalidate_product(&mut self) {
        self.generation += 1;
        self.product = None;
        self.lookup_in_flight = false;
    }

    pub fn product(&self) -> Option<&ProductDetails> {
        self.product.as_ref()
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.lookup_in_flight || self.submitting
    }

    pub fn adjusted(&self) -> &DimensionInputs {
        &self.adjusted
    }

    pub fn set_adjusted_height(&mut self, value: impl Into<String>) {
        self.adjusted.height = value.into();
    }

    pub fn set_adjusted_depth(&mut self, value: impl Into<String>) {
        self.adjusted.depth = value.into();
    }

    pub fn set_adjusted_dimensions(&mut self, dims: DimensionInputs) {
        self.adjusted = dims;
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn set_quantity(&mut self, value: impl Into<String>) {
        self.quantity = value.into();
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn set_customer_name(&mut self, value: impl Into<String>) {
        self.customer.name = value.into();
    }

    pub fn set_customer_phone(&mut self, value: impl Into<String>) {
        self.customer.phone = Masked(value.into());
    }

    /// Current price, derived from the product, dimensions and quantity.
    pub fn pricing(&self) -> Option<PricingResult> {
        let product = self.product.as_ref()?;
        Some(self.engine.price_product(
            product,
            &self.adjusted.height,
            &self.adjusted.depth,
            &self.quantity,
        ))
    }

    pub fn price_display(&self, format: &CurrencyFormat) -> Option<PriceDisplay> {
        let product = self.product.as_ref()?;
        let pricing = self.pricing()?;
        Some(PriceDisplay {
            listed: format!("{} / {}", format.format(product.listed_price), product.unit),
            unit: format.format(pricing.unit_price),
            total: format.format(pricing.total_price),
        })
    }

    pub fn submit_status(&self) -> Option<&SubmitStatus> {
        self.submit_status.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.product.is_some() && !self.is_loading()
    }

    /// Validates the form and builds the request to send. Marks the form as
    /// submitting on success; nothing is sent on error.
    pub fn prepare_submission(&mut self) -> Result<QuoteRequest, FormError> {
        if self.submitting {
            return Err(FormError::SubmissionInFlight);
        }
        if self.product.is_none() {
            return Err(FormError::NoProduct);
        }
        if let Err(e) = self.customer.validate() {
            return Err(self.reject(e));
        }
        let product = self.product.as_ref().ok_or(FormError::NoProduct)?;

        let pricing = self.engine.price_product(
            product,
            &self.adjusted.height,
            &self.adjusted.depth,
            &self.quantity,
        );

        let name_of = |field: SelectionField| -> (Option<OptionId>, String) {
            let id = self.selection.get(field).cloned();
            let name = id
                .as_ref()
                .and_then(|id| self.options.name_of(field, id))
                .unwrap_or_default()
                .to_string();
            (id, name)
        };
        let (aluminum_id, aluminum_name) = name_of(SelectionField::Aluminum);
        let (handle_id, handle_name) = name_of(SelectionField::Handle);
        let (glass_id, glass_name) = name_of(SelectionField::Glass);
        let (part_id, part_name) = name_of(SelectionField::Part);

        let request = QuoteRequest {
            customer_name: self.customer.name.trim().to_string(),
            customer_phone: Masked(self.customer.phone.expose().trim().to_string()),
            product_id: product.product_id.clone(),
            actual_width: product.standard_width,
            actual_height: pricing.adjusted.height,
            actual_depth: pricing.adjusted.depth,
            quantity: pricing.quantity,
            total_price: pricing.total_price,
            aluminum_id,
            aluminum_name,
            handle_id,
            handle_name,
            glass_id,
            glass_name,
            part_id,
            part_name,
        };

        // Anything the server would refuse (e.g. a zero height) is caught here,
        // since resending the same request could never succeed.
        if let Err(e) = request.validate() {
            return Err(self.reject(e));
        }

        self.submitting = true;
        self.submit_status = None;
        Ok(request)
    }

    fn reject(&mut self, err: CoreError) -> FormError {
        let message = match err {
            CoreError::ValidationError(msg) => msg,
            other => other.to_string(),
        };
        self.submit_status = Some(SubmitStatus::error(message.clone()));
        FormError::Validation(message)
    }

    /// Applies the submission outcome. Success starts a fresh quote; failure
    /// keeps everything so the visitor can retry.
    pub fn receive_submission(&mut self, result: Result<QuoteAck, BackendError>) {
        self.submitting = false;
        match result {
            Ok(ack) => {
                info!("Quote submitted: {:?}", ack.quote_id);
                self.submit_status = Some(SubmitStatus::success(SUBMIT_SUCCESS_MESSAGE));
                self.customer = CustomerInfo::default();
                self.selection.reset();
                self.adjusted = DimensionInputs::default();
                self.quantity = "1".to_string();
                self.invalidate_product();
            }
            Err(e) => {
                warn!("Quote submission failed: {}", e);
                self.submit_status = Some(SubmitStatus::error(SUBMIT_FAILURE_MESSAGE));
            }
        }
    }
}
