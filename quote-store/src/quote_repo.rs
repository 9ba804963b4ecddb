use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_core::repository::{QuoteRepository, RepositoryError, RepositoryResult};
use quote_core::{NewQuote, Notification, QuoteRecord};
use quote_shared::Masked;
use sqlx::PgPool;
use uuid::Uuid;

use crate::catalog_repo::backend;

pub struct PgQuoteRepository {
    pool: PgPool,
}

impl PgQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    customer_name: String,
    customer_phone: String,
    product_id: String,
    actual_width: f64,
    actual_height: f64,
    actual_depth: f64,
    quantity: i32,
    total_price: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuoteRow> for QuoteRecord {
    type Error = RepositoryError;

    fn try_from(row: QuoteRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            RepositoryError::InvalidData(format!("quote {} has quantity {}", row.id, row.quantity))
        })?;
        Ok(QuoteRecord {
            id: row.id,
            quote: NewQuote {
                customer_name: row.customer_name,
                customer_phone: Masked(row.customer_phone),
                product_id: row.product_id,
                actual_width: row.actual_width,
                actual_height: row.actual_height,
                actual_depth: row.actual_depth,
                quantity,
                total_price: row.total_price,
            },
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    quote_id: Uuid,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.id,
            quote_id: row.quote_id,
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl QuoteRepository for PgQuoteRepository {
    async fn create_quote(&self, quote: &NewQuote) -> RepositoryResult<QuoteRecord> {
        let quantity = i32::try_from(quote.quantity)
            .map_err(|_| RepositoryError::InvalidData(format!("quantity {} too large", quote.quantity)))?;

        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            INSERT INTO quotes (id, customer_name, customer_phone, product_id,
                                actual_width, actual_height, actual_depth, quantity, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, customer_name, customer_phone, product_id,
                      actual_width, actual_height, actual_depth, quantity, total_price, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&quote.customer_name)
        .bind(quote.customer_phone.expose())
        .bind(&quote.product_id)
        .bind(quote.actual_width)
        .bind(quote.actual_height)
        .bind(quote.actual_depth)
        .bind(quantity)
        .bind(quote.total_price)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.try_into()
    }

    async fn get_quote(&self, id: Uuid) -> RepositoryResult<Option<QuoteRecord>> {
        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, customer_name, customer_phone, product_id,
                   actual_width, actual_height, actual_depth, quantity, total_price, created_at
            FROM quotes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(QuoteRecord::try_from).transpose()
    }

    async fn create_notification(
        &self,
        quote_id: Uuid,
        message: &str,
    ) -> RepositoryResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            INSERT INTO notifications (id, quote_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, quote_id, message, is_read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(quote_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }

    async fn list_notifications(&self) -> RepositoryResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT id, quote_id, message, is_read, created_at FROM notifications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }
}
