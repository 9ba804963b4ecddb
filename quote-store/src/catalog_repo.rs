use async_trait::async_trait;
use quote_catalog::{OptionCatalog, OptionEntity, OptionId, ProductDetails, SelectionField};
use quote_core::repository::{CatalogRepository, RepositoryError, RepositoryResult};
use sqlx::PgPool;
use tracing::warn;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_table(&self, field: SelectionField) -> RepositoryResult<Vec<OptionEntity>> {
        let sql = format!("SELECT id::text AS id, name FROM {} ORDER BY id", field.table());
        let rows = sqlx::query_as::<_, OptionRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|r| OptionEntity::new(r.id, r.name))
            .collect())
    }
}

#[derive(sqlx::FromRow)]
struct OptionRow {
    id: String,
    name: String,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: String,
    standard_width: f64,
    standard_height: f64,
    standard_depth: f64,
    price: f64,
    unit: String,
    material_percentage: f64,
}

impl From<ProductRow> for ProductDetails {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            standard_width: row.standard_width,
            standard_height: row.standard_height,
            standard_depth: row.standard_depth,
            listed_price: row.price,
            unit: row.unit,
            material_percentage: row.material_percentage,
        }
    }
}

pub(crate) fn backend(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(e.to_string())
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_options(&self) -> RepositoryResult<OptionCatalog> {
        let mut catalog = OptionCatalog::default();
        for field in SelectionField::ALL {
            *catalog.entries_mut(field) = self.list_table(field).await?;
        }
        Ok(catalog)
    }

    async fn find_product(&self, product_id: &str) -> RepositoryResult<Option<ProductDetails>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, standard_width, standard_height, standard_depth,
                   price, unit, material_percentage
            FROM product_details
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        let product = row.map(ProductDetails::from);
        if let Some(p) = &product {
            if let Err(e) = p.validate() {
                warn!("Product {} has suspicious data: {}", p.product_id, e);
            }
        }
        Ok(product)
    }

    async fn option_name(
        &self,
        field: SelectionField,
        id: &OptionId,
    ) -> RepositoryResult<Option<String>> {
        let sql = format!("SELECT name FROM {} WHERE id::text = $1", field.table());
        let name: Option<(String,)> = sqlx::query_as(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(name.map(|(n,)| n))
    }
}
