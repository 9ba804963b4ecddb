use chrono::{DateTime, Utc};
use quote_catalog::{OptionId, OptionSelection, SelectionField};
use quote_shared::Masked;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Largest quantity a single quote may carry.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// Message shown when the contact fields are incomplete.
pub const MISSING_CONTACT_MESSAGE: &str = "Please enter both your full name and phone number.";

/// Contact details typed in by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: Masked<String>,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: Masked(phone.into()),
        }
    }

    /// Name and phone must both be non-blank before anything is sent.
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() || self.phone.expose().trim().is_empty() {
            return Err(CoreError::ValidationError(MISSING_CONTACT_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Quote request as posted to `POST /api/quotes`.
///
/// Every field defaults when absent so that incomplete payloads reach
/// [`QuoteRequest::validate`] and get a readable error instead of a parse
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "customerPhone")]
    pub customer_phone: Masked<String>,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "actualWidth", deserialize_with = "lenient_f64")]
    pub actual_width: f64,
    #[serde(rename = "actualHeight", deserialize_with = "lenient_f64")]
    pub actual_height: f64,
    #[serde(rename = "actualDepth", deserialize_with = "lenient_f64")]
    pub actual_depth: f64,
    #[serde(deserialize_with = "lenient_u32")]
    pub quantity: u32,
    #[serde(rename = "totalPrice", deserialize_with = "lenient_f64")]
    pub total_price: f64,
    pub aluminum_id: Option<OptionId>,
    pub aluminum_name: String,
    pub handle_id: Option<OptionId>,
    pub handle_name: String,
    pub glass_id: Option<OptionId>,
    pub glass_name: String,
    pub part_id: Option<OptionId>,
    pub part_name: String,
}

impl QuoteRequest {
    /// Rejects requests with a blank or zero required field, naming them all.
    pub fn validate(&self) -> CoreResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customerName");
        }
        if self.customer_phone.expose().trim().is_empty() {
            missing.push("customerPhone");
        }
        if self.product_id.trim().is_empty() {
            missing.push("productId");
        }
        if !positive(self.actual_width) {
            missing.push("actualWidth");
        }
        if !positive(self.actual_height) {
            missing.push("actualHeight");
        }
        if !positive(self.actual_depth) {
            missing.push("actualDepth");
        }
        if self.quantity == 0 {
            missing.push("quantity");
        }
        if !positive(self.total_price) {
            missing.push("totalPrice");
        }

        if !missing.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Missing required fields in quote data: {}",
                missing.join(", ")
            )));
        }
        if self.quantity > MAX_QUANTITY {
            return Err(CoreError::ValidationError(format!(
                "quantity must not exceed {}",
                MAX_QUANTITY
            )));
        }
        Ok(())
    }

    pub fn selection(&self) -> OptionSelection {
        OptionSelection {
            aluminum_id: self.aluminum_id.clone(),
            handle_id: self.handle_id.clone(),
            glass_id: self.glass_id.clone(),
            part_id: self.part_id.clone(),
        }
    }

    /// Display name the client sent along for `field`.
    pub fn option_name(&self, field: SelectionField) -> &str {
        match field {
            SelectionField::Aluminum => &self.aluminum_name,
            SelectionField::Handle => &self.handle_name,
            SelectionField::Glass => &self.glass_name,
            SelectionField::Part => &self.part_name,
        }
    }
}

/// Row written to the `quotes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuote {
    pub customer_name: String,
    pub customer_phone: Masked<String>,
    pub product_id: String,
    pub actual_width: f64,
    pub actual_height: f64,
    pub actual_depth: f64,
    pub quantity: u32,
    pub total_price: f64,
}

impl From<&QuoteRequest> for NewQuote {
    fn from(req: &QuoteRequest) -> Self {
        Self {
            customer_name: req.customer_name.trim().to_string(),
            customer_phone: Masked(req.customer_phone.expose().trim().to_string()),
            product_id: req.product_id.trim().to_string(),
            actual_width: req.actual_width,
            actual_height: req.actual_height,
            actual_depth: req.actual_depth,
            quantity: req.quantity,
            total_price: req.total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub quote: NewQuote,
    pub created_at: DateTime<Utc>,
}

/// Admin-facing notice that a quote arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

/// Accepts numbers, numeric strings and `null` (read as 0).
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LenientNumber>::deserialize(deserializer)? {
        Some(LenientNumber::Number(n)) => n,
        Some(LenientNumber::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    if value.is_finite() && value >= 1.0 {
        Ok(value.trunc().min(u32::MAX as f64) as u32)
    } else {
        Ok(0)
    }
}
