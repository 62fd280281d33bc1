//! Database operations for `stores`.

use chrono::{DateTime, Utc};
use sheetstore_core::{ColorRoles, PresetKind, PublishPlan, Store};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

const STORE_COLUMNS: &str =
    "id, name, sheets_url, whatsapp_number, theme, theme_colors, created_at, updated_at";

/// A row from the `stores` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: i64,
    pub name: String,
    pub sheets_url: String,
    pub whatsapp_number: String,
    /// Preset key; constrained to the built-in presets by the schema.
    pub theme: Option<String>,
    pub theme_colors: Option<Json<ColorRoles>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Store {
            id: row.id,
            name: row.name,
            sheets_url: row.sheets_url,
            whatsapp_number: row.whatsapp_number,
            theme: row
                .theme
                .as_deref()
                .and_then(|t| t.parse::<PresetKind>().ok()),
            theme_colors: row.theme_colors.map(|colors| colors.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Persists a validated publish plan: the store row first, then every
/// product referencing it.
///
/// All inserts run inside a single transaction; if any of them fails the
/// whole publish is rolled back and no store row is left behind.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn publish_store(pool: &PgPool, plan: &PublishPlan) -> Result<Store, DbError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query_as::<_, StoreRow>(&format!(
        "INSERT INTO stores (name, sheets_url, whatsapp_number, theme, theme_colors) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {STORE_COLUMNS}"
    ))
    .bind(&plan.name)
    .bind(&plan.sheets_url)
    .bind(&plan.whatsapp_number)
    .bind(plan.theme.map(PresetKind::as_str))
    .bind(plan.theme_colors.as_ref().map(Json))
    .fetch_one(&mut *tx)
    .await?;

    for product in &plan.products {
        sqlx::query(
            "INSERT INTO products \
                 (store_id, name, price, description, image_url, category, position) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(row.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.position)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(row.into())
}

/// Loads a store by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no store has this id, or
/// [`DbError::Sqlx`] on query failure.
pub async fn get_store(pool: &PgPool, id: i64) -> Result<Store, DbError> {
    sqlx::query_as::<_, StoreRow>(&format!("SELECT {STORE_COLUMNS} FROM stores WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Store::from)
        .ok_or(DbError::NotFound)
}

/// Renames a store and bumps `updated_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no store has this id, or
/// [`DbError::Sqlx`] on query failure.
pub async fn update_store_name(pool: &PgPool, id: i64, name: &str) -> Result<Store, DbError> {
    sqlx::query_as::<_, StoreRow>(&format!(
        "UPDATE stores SET name = $2, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {STORE_COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await?
    .map(Store::from)
    .ok_or(DbError::NotFound)
}
