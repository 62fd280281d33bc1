//! Database operations for `products`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sheetstore_core::{Price, Product};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub store_id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    /// Storefront products are addressed by their row id.
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id.to_string(),
            name: row.name,
            price: Price::from(row.price),
            description: row.description,
            image: row.image_url,
            category: row.category,
        }
    }
}

/// Lists a store's products in catalog order.
///
/// Returns an empty `Vec` for unknown store ids; callers check the store
/// exists first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure.
pub async fn list_store_products(pool: &PgPool, store_id: i64) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, store_id, name, price, description, image_url, category, position, created_at \
         FROM products \
         WHERE store_id = $1 \
         ORDER BY position, id",
    )
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
