//! `order` command handler.

use sheetstore_core::{compose_order, AppConfig, Product, Selection};

/// Compose an order against a published store and print the message and
/// deep link.
///
/// # Errors
///
/// Returns an error if the store does not exist, has no contact number, or
/// none of `product_ids` belongs to it.
pub(crate) async fn run_order(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    store_id: i64,
    product_ids: Vec<String>,
) -> anyhow::Result<()> {
    let store = sheetstore_db::get_store(pool, store_id)
        .await
        .map_err(|e| anyhow::anyhow!("store {store_id}: {e}"))?;
    let products: Vec<Product> = sheetstore_db::list_store_products(pool, store_id)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let selection: Selection = product_ids.into_iter().collect();
    let order = compose_order(&store.name, &store.whatsapp_number, &products, &selection)?;

    println!("{}", order.text);
    println!();
    println!("{}", order.deep_link(&config.messaging_base_url));
    Ok(())
}
