pub mod options;
pub mod selection;
pub mod product;
pub mod pricing;
pub mod currency;

pub use options::{OptionCatalog, OptionEntity, OptionId, SelectionField};
pub use selection::OptionSelection;
pub use product::{CatalogError, ProductDetails};
pub use pricing::{
    parse_optional_number, parse_quantity, Dimensions, PricingEngine, PricingInput, PricingResult,
};
pub use currency::CurrencyFormat;
