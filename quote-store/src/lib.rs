pub mod app_config;
pub mod database;
pub mod catalog_repo;
pub mod quote_repo;
pub mod memory;
pub mod notifier;

pub use app_config::Config;
pub use catalog_repo::PgCatalogRepository;
pub use database::DbClient;
pub use memory::{CatalogSeed, MemoryCatalogRepository, MemoryQuoteRepository};
pub use notifier::{LogNotifier, WebhookNotifier};
pub use quote_repo::PgQuoteRepository;
