use std::sync::Arc;

use quote_core::QuoteService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuoteService>,
}

impl AppState {
    pub fn new(service: QuoteService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
