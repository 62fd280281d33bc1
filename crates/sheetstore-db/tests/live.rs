//! Live integration tests for sheetstore-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/sheetstore-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use rust_decimal::Decimal;
use sheetstore_core::{prepare_publish, ColorRoles, PresetKind, Product, PublishPlan};
use sheetstore_db::{get_store, list_store_products, publish_store, update_store_name, DbError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_plan() -> PublishPlan {
    let mut mug = Product::new("a", "Mug", "10");
    mug.category = Some("Kitchen".to_string());
    let tote = Product::new("b", "Tote Bag", "15.50");
    prepare_publish(
        "Corner Shop",
        "https://docs.google.com/spreadsheets/d/abc/edit",
        "+1 555 0100",
        Some(PresetKind::Minimal),
        None,
        &[mug, tote],
    )
    .expect("sample plan should validate")
}

async fn count_rows(pool: &sqlx::PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("count of {table} failed: {e}"))
}

// ---------------------------------------------------------------------------
// publish_store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn publish_store_persists_store_and_products(pool: sqlx::PgPool) {
    let store = publish_store(&pool, &sample_plan())
        .await
        .expect("publish_store failed");

    assert_eq!(store.name, "Corner Shop");
    assert_eq!(store.whatsapp_number, "+1 555 0100");
    assert_eq!(store.theme, Some(PresetKind::Minimal));

    let products = list_store_products(&pool, store.id)
        .await
        .expect("list_store_products failed");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Mug");
    assert_eq!(products[0].category.as_deref(), Some("Kitchen"));
    assert_eq!(products[1].price, Decimal::new(155, 1));
    assert!(products.iter().all(|p| p.store_id == store.id));
}

#[sqlx::test(migrations = "../../migrations")]
async fn publish_store_round_trips_custom_colors(pool: sqlx::PgPool) {
    let colors = ColorRoles {
        background: "#101010".to_string(),
        foreground: "#fafafa".to_string(),
        primary: "#ff6600".to_string(),
        secondary: "#333333".to_string(),
        accent: "#00ccff".to_string(),
    };
    let mut plan = sample_plan();
    plan.theme_colors = Some(colors.clone());

    let published = publish_store(&pool, &plan)
        .await
        .expect("publish_store failed");
    assert_eq!(published.theme_colors, Some(colors.clone()));

    let loaded = get_store(&pool, published.id)
        .await
        .expect("get_store failed");
    assert_eq!(loaded.theme_colors, Some(colors));
    assert_eq!(loaded.theme, Some(PresetKind::Minimal));
}

#[sqlx::test(migrations = "../../migrations")]
async fn publish_store_rolls_back_on_product_failure(pool: sqlx::PgPool) {
    let mut plan = sample_plan();
    // Violates the price >= 0 check; only reachable by bypassing prepare_publish.
    plan.products[1].price = Decimal::new(-1, 0);

    let result = publish_store(&pool, &plan).await;
    assert!(matches!(result, Err(DbError::Sqlx(_))), "got {result:?}");
    assert_eq!(count_rows(&pool, "stores").await, 0);
    assert_eq!(count_rows(&pool, "products").await, 0);
}

// ---------------------------------------------------------------------------
// get_store / update_store_name
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn get_store_returns_published_store(pool: sqlx::PgPool) {
    let published = publish_store(&pool, &sample_plan())
        .await
        .expect("publish_store failed");

    let loaded = get_store(&pool, published.id)
        .await
        .expect("get_store failed");
    assert_eq!(loaded, published);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_store_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let result = get_store(&pool, 999_999).await;
    assert!(matches!(result, Err(DbError::NotFound)), "got {result:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_store_name_renames_and_touches_updated_at(pool: sqlx::PgPool) {
    let published = publish_store(&pool, &sample_plan())
        .await
        .expect("publish_store failed");

    let renamed = update_store_name(&pool, published.id, "Night Market")
        .await
        .expect("update_store_name failed");
    assert_eq!(renamed.name, "Night Market");
    assert_eq!(renamed.sheets_url, published.sheets_url);
    assert!(renamed.updated_at >= published.updated_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_store_name_unknown_id_is_not_found(pool: sqlx::PgPool) {
    let result = update_store_name(&pool, 999_999, "Nobody").await;
    assert!(matches!(result, Err(DbError::NotFound)), "got {result:?}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_store_products_for_unknown_store_is_empty(pool: sqlx::PgPool) {
    let rows = list_store_products(&pool, 999_999)
        .await
        .expect("list_store_products failed");
    assert!(rows.is_empty());
}
