use quote_catalog::{OptionSelection, ProductDetails};
use serde::{Deserialize, Serialize};

/// Raw text of the height/depth fields while the visitor edits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionInputs {
    pub height: String,
    pub depth: String,
}

impl DimensionInputs {
    pub fn new(height: impl Into<String>, depth: impl Into<String>) -> Self {
        Self {
            height: height.into(),
            depth: depth.into(),
        }
    }

    /// Standard height/depth of `product`, as the fields show them.
    pub fn standard_of(product: &ProductDetails) -> Self {
        Self::new(
            product.standard_height.to_string(),
            product.standard_depth.to_string(),
        )
    }
}

/// User-facing warning shown in the product section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    OptionsUnavailable,
    ProductNotFound,
    LookupFailed,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::OptionsUnavailable => "Could not load the option lists from the server.",
            Advisory::ProductNotFound => {
                "No product matches this combination. Please choose again."
            }
            Advisory::LookupFailed => "Could not load product details. Please try again.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

/// Outcome banner of the last submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl SubmitStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

/// Handle for one product lookup. Responses are applied only while the
/// ticket's generation is still the form's current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub selection: OptionSelection,
}

/// Prices formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub listed: String,
    pub unit: String,
    pub total: String,
}
