use serde::{Deserialize, Deserializer, Serialize};

use crate::pricing::Dimensions;

/// Concrete product resolved from a complete four-way selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product_id: String,
    /// Standard width in millimeters.
    #[serde(deserialize_with = "de_number")]
    pub standard_width: f64,
    #[serde(deserialize_with = "de_number")]
    pub standard_height: f64,
    #[serde(deserialize_with = "de_number")]
    pub standard_depth: f64,
    /// Listed price of one unit at standard size.
    #[serde(rename = "price", deserialize_with = "de_number")]
    pub listed_price: f64,
    /// Display label, e.g. "bộ" or "cái".
    #[serde(default)]
    pub unit: String,
    /// Share of the listed price that scales with surface area, 0-100.
    #[serde(deserialize_with = "de_number")]
    pub material_percentage: f64,
}

impl ProductDetails {
    pub fn standard_dimensions(&self) -> Dimensions {
        Dimensions::new(self.standard_width, self.standard_height, self.standard_depth)
    }

    /// Checks that a catalog row is usable before it is served.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.product_id.trim().is_empty() {
            return Err(CatalogError::InvalidProduct("product_id is empty".to_string()));
        }

        let dims = [
            ("standard_width", self.standard_width),
            ("standard_height", self.standard_height),
            ("standard_depth", self.standard_depth),
            ("price", self.listed_price),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(CatalogError::InvalidProduct(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=100.0).contains(&self.material_percentage) {
            return Err(CatalogError::InvalidProduct(format!(
                "material_percentage must be within 0-100, got {}",
                self.material_percentage
            )));
        }

        Ok(())
    }
}

/// Numeric columns sometimes arrive as strings (`"600"`); accept both.
fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
    }

    match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => Ok(n),
        RawNumber::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
}
