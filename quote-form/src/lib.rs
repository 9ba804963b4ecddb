pub mod models;
pub mod backend;
pub mod client;
pub mod controller;
pub mod orchestrator;

pub use models::{Advisory, DimensionInputs, FetchTicket, PriceDisplay, StatusKind, SubmitStatus};
pub use backend::{BackendError, QuoteAck, QuoteBackend};
pub use client::HttpQuoteBackend;
pub use controller::{FormError, QuoteForm};
pub use orchestrator::QuoteSession;
