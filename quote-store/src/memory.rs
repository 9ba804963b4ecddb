use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use quote_catalog::{OptionCatalog, OptionEntity, OptionId, ProductDetails, SelectionField};
use quote_core::repository::{
    CatalogRepository, QuoteRepository, RepositoryError, RepositoryResult,
};
use quote_core::{NewQuote, Notification, QuoteRecord};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// JSON layout of a catalog seed file.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub options: OptionCatalog,
    #[serde(default)]
    pub products: Vec<ProductDetails>,
}

/// Catalog held in memory, for development and tests.
#[derive(Default)]
pub struct MemoryCatalogRepository {
    options: RwLock<OptionCatalog>,
    products: RwLock<HashMap<String, ProductDetails>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        let products = seed
            .products
            .into_iter()
            .map(|p| (p.product_id.clone(), p))
            .collect();
        Self {
            options: RwLock::new(seed.options),
            products: RwLock::new(products),
        }
    }

    pub fn from_json(json: &str) -> RepositoryResult<Self> {
        let seed: CatalogSeed = serde_json::from_str(json)
            .map_err(|e| RepositoryError::InvalidData(format!("catalog seed: {}", e)))?;
        Ok(Self::from_seed(seed))
    }

    pub async fn from_json_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::Backend(format!("{}: {}", path.display(), e)))?;
        let repo = Self::from_json(&json)?;
        info!(
            "Loaded catalog seed {} ({} products)",
            path.display(),
            repo.products.read().await.len()
        );
        Ok(repo)
    }

    pub async fn insert_option(&self, field: SelectionField, id: impl Into<OptionId>, name: &str) {
        let mut options = self.options.write().await;
        let id = id.into();
        let entries = options.entries_mut(field);
        entries.retain(|e| e.id != id);
        entries.push(OptionEntity::new(id, name));
    }

    pub async fn insert_product(&self, product: ProductDetails) {
        self.products
            .write()
            .await
            .insert(product.product_id.clone(), product);
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list_options(&self) -> RepositoryResult<OptionCatalog> {
        Ok(self.options.read().await.clone())
    }

    async fn find_product(&self, product_id: &str) -> RepositoryResult<Option<ProductDetails>> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn option_name(
        &self,
        field: SelectionField,
        id: &OptionId,
    ) -> RepositoryResult<Option<String>> {
        Ok(self
            .options
            .read()
            .await
            .name_of(field, id)
            .map(str::to_string))
    }
}

/// Quotes and notifications kept in memory.
#[derive(Default)]
pub struct MemoryQuoteRepository {
    quotes: RwLock<Vec<QuoteRecord>>,
    notifications: RwLock<Vec<Notification>>,
}

impl MemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for MemoryQuoteRepository {
    async fn create_quote(&self, quote: &NewQuote) -> RepositoryResult<QuoteRecord> {
        let record = QuoteRecord {
            id: Uuid::new_v4(),
            quote: quote.clone(),
            created_at: Utc::now(),
        };
        self.quotes.write().await.push(record.clone());
        Ok(record)
    }

    async fn get_quote(&self, id: Uuid) -> RepositoryResult<Option<QuoteRecord>> {
        Ok(self.quotes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn create_notification(
        &self,
        quote_id: Uuid,
        message: &str,
    ) -> RepositoryResult<Notification> {
        if !self.quotes.read().await.iter().any(|q| q.id == quote_id) {
            return Err(RepositoryError::NotFound(format!("quote {}", quote_id)));
        }
        let notification = Notification {
            id: Uuid::new_v4(),
            quote_id,
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>> {
        let mut all = self.notifications.read().await.clone();
        all.reverse();
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_shared::Masked;

    const SEED: &str = r#"{
        "options": {
            "aluminums": [{ "id": 1, "name": "Xingfa" }],
            "handles": [{ "id": "2", "name": "Bar" }],
            "glasses": [{ "id": 3, "name": "Clear" }],
            "parts": [{ "id": 4, "name": "Door" }]
        },
        "products": [{
            "product_id": "1234",
            "standard_width": 600,
            "standard_height": "2000",
            "standard_depth": 300,
            "price": 1000000,
            "unit": "bộ",
            "material_percentage": 70
        }]
    }"#;

    fn quote() -> NewQuote {
        NewQuote {
            customer_name: "Hoang E".to_string(),
            customer_phone: Masked("0933333333".to_string()),
            product_id: "1234".to_string(),
            actual_width: 600.0,
            actual_height: 2000.0,
            actual_depth: 300.0,
            quantity: 1,
            total_price: 1_000_000.0,
        }
    }

    #[tokio::test]
    async fn test_seeded_catalog() {
        let repo = MemoryCatalogRepository::from_json(SEED).unwrap();

        let options = repo.list_options().await.unwrap();
        assert_eq!(options.handles[0].id.as_str(), "2");

        let product = repo.find_product("1234").await.unwrap().unwrap();
        assert_eq!(product.standard_height, 2000.0);
        assert!(repo.find_product("9999").await.unwrap().is_none());

        let name = repo
            .option_name(SelectionField::Glass, &OptionId::from("3"))
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("Clear"));
        assert!(repo
            .option_name(SelectionField::Glass, &OptionId::from("7"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_bad_seed_is_invalid_data() {
        let err = MemoryCatalogRepository::from_json("{ not json").err().unwrap();
        assert!(matches!(err, RepositoryError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_insert_option_replaces_same_id() {
        let repo = MemoryCatalogRepository::new();
        repo.insert_option(SelectionField::Part, "4", "Door").await;
        repo.insert_option(SelectionField::Part, "4", "Drawer").await;
        let options = repo.list_options().await.unwrap();
        assert_eq!(options.parts.len(), 1);
        assert_eq!(options.parts[0].name, "Drawer");
    }

    #[tokio::test]
    async fn test_quotes_and_notifications() {
        let repo = MemoryQuoteRepository::new();
        let record = repo.create_quote(&quote()).await.unwrap();
        assert_eq!(repo.get_quote(record.id).await.unwrap().unwrap(), record);

        repo.create_notification(record.id, "first").await.unwrap();
        repo.create_notification(record.id, "second").await.unwrap();
        let listed = repo.list_notifications().await.unwrap();
        assert_eq!(listed[0].message, "second");
        assert!(!listed[0].is_read);

        let orphan = repo.create_notification(Uuid::new_v4(), "lost").await;
        assert!(matches!(orphan, Err(RepositoryError::NotFound(_))));
    }
}
