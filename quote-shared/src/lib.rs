pub mod models;
pub mod pii;

pub use models::events::{QuoteOptionNames, QuoteSubmittedEvent};
pub use pii::Masked;
