use serde::{Deserialize, Serialize};

use crate::product::ProductDetails;

/// Outer box geometry in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self { width, height, depth }
    }

    /// Surface area of the closed rectangular box.
    pub fn surface_area(&self) -> f64 {
        2.0 * (self.width * self.height + self.width * self.depth + self.height * self.depth)
    }

    /// All three sides finite and strictly positive.
    pub fn is_proper(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|side| side.is_finite() && *side > 0.0)
    }
}

/// Parses user-entered text as a number.
///
/// Empty, non-numeric and non-finite input yields `fallback`. A parsed zero is
/// returned as zero, unlike a truthiness check would.
pub fn parse_optional_number(value: &str, fallback: f64) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Parses a quantity field. Decimal input is truncated toward zero; anything
/// unparseable is `None`. Sign is preserved, range policy is the engine's.
pub fn parse_quantity(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.abs() < i64::MAX as f64 => Some(n.trunc() as i64),
        _ => None,
    }
}

/// Everything the engine needs to price one line of a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub listed_price: f64,
    pub standard: Dimensions,
    /// 0-100; values outside are clamped.
    pub material_percentage: f64,
    /// Requested height; `None` means "use the standard height".
    pub adjusted_height: Option<f64>,
    pub adjusted_depth: Option<f64>,
    /// `None` or non-positive means 1.
    pub quantity: Option<i64>,
}

impl PricingInput {
    pub fn for_product(product: &ProductDetails) -> Self {
        Self {
            listed_price: product.listed_price,
            standard: product.standard_dimensions(),
            material_percentage: product.material_percentage,
            adjusted_height: None,
            adjusted_depth: None,
            quantity: None,
        }
    }

    pub fn with_adjusted(mut self, height: Option<f64>, depth: Option<f64>) -> Self {
        self.adjusted_height = height;
        self.adjusted_depth = depth;
        self
    }

    pub fn with_quantity(mut self, quantity: Option<i64>) -> Self {
        self.quantity = quantity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Price of one unit at the adjusted size.
    pub unit_price: f64,
    pub total_price: f64,
    /// Adjusted over standard surface area.
    pub area_ratio: f64,
    /// Quantity actually applied after fallback.
    pub quantity: u32,
    /// Geometry actually priced after fallback.
    pub adjusted: Dimensions,
}

/// Prices a product at a custom height/depth.
///
/// Only the material share of the listed price scales with surface area; the
/// rest (labor, fittings) is fixed per unit. Width is never adjustable.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine;

impl PricingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Adjusted over standard surface area, or 1 when the standard geometry is
    /// degenerate (any standard dimension zero or the area not positive).
    pub fn area_ratio(&self, standard: &Dimensions, adjusted: &Dimensions) -> f64 {
        let surface_std = standard.surface_area();
        if !standard.is_proper() || !(surface_std.is_finite() && surface_std > 0.0) {
            return 1.0;
        }
        adjusted.surface_area() / surface_std
    }

    pub fn calculate(&self, input: &PricingInput) -> PricingResult {
        let standard = input.standard;
        let adjusted = Dimensions::new(
            standard.width,
            resolve_dimension(input.adjusted_height, standard.height),
            resolve_dimension(input.adjusted_depth, standard.depth),
        );

        let ratio = self.area_ratio(&standard, &adjusted);
        let material_fraction = input.material_percentage.clamp(0.0, 100.0) / 100.0;
        let unit_price =
            input.listed_price * (material_fraction * ratio + (1.0 - material_fraction));
        let quantity = resolve_quantity(input.quantity);

        PricingResult {
            unit_price,
            total_price: unit_price * f64::from(quantity),
            area_ratio: ratio,
            quantity,
            adjusted,
        }
    }

    /// Prices `product` from the raw text of the height, depth and quantity
    /// fields.
    pub fn price_product(
        &self,
        product: &ProductDetails,
        height: &str,
        depth: &str,
        quantity: &str,
    ) -> PricingResult {
        let input = PricingInput::for_product(product)
            .with_adjusted(
                Some(parse_optional_number(height, product.standard_height)),
                Some(parse_optional_number(depth, product.standard_depth)),
            )
            .with_quantity(parse_quantity(quantity));
        self.calculate(&input)
    }
}

fn resolve_dimension(value: Option<f64>, standard: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => standard,
    }
}

fn resolve_quantity(value: Option<i64>) -> u32 {
    match value {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}
