//! `import` and `publish` command handlers.

use std::str::FromStr;

use sheetstore_core::{
    prepare_publish, resolve_preset_kind, AppConfig, ColorRoles, PresetKind, PublishPlan,
};
use sheetstore_importer::{ImportedCatalog, SheetClient};

fn sheet_client(config: &AppConfig) -> anyhow::Result<SheetClient> {
    let client = SheetClient::new(
        config.fetch_timeout_secs,
        &config.user_agent,
        config.placeholder_image_url.clone(),
    )?;
    Ok(client)
}

/// Accepts a preset key (`bold`) or free text (`"dark and bold"`).
pub(crate) fn theme_from_arg(raw: &str) -> PresetKind {
    PresetKind::from_str(raw).unwrap_or_else(|_| resolve_preset_kind(raw))
}

/// Parses `--colors` as five comma-separated values in role order:
/// background, foreground, primary, secondary, accent.
///
/// Only the count is checked here; the values are validated when the
/// publish plan is prepared.
pub(crate) fn colors_from_arg(raw: &str) -> anyhow::Result<ColorRoles> {
    let values: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [background, foreground, primary, secondary, accent] = values.as_slice() else {
        anyhow::bail!(
            "--colors needs 5 values (background,foreground,primary,secondary,accent), got {}",
            values.len()
        );
    };
    Ok(ColorRoles {
        background: (*background).to_string(),
        foreground: (*foreground).to_string(),
        primary: (*primary).to_string(),
        secondary: (*secondary).to_string(),
        accent: (*accent).to_string(),
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_catalog(catalog: &ImportedCatalog) {
    println!("{:<10}{:<34}{:<12}CATEGORY", "ID", "NAME", "PRICE");
    for product in &catalog.products {
        println!(
            "{:<10}{:<34}{:<12}{}",
            truncate(&product.id, 8),
            truncate(&product.name, 30),
            truncate(&product.price.to_string(), 10),
            product.category.as_deref().unwrap_or("-"),
        );
    }
    for skipped in &catalog.skipped_rows {
        println!("  skipped row {}: {}", skipped.row, skipped.reason);
    }
    println!(
        "{} product(s), {} row(s) skipped",
        catalog.products.len(),
        catalog.skipped_rows.len()
    );
}

/// Fetch a sheet and print its catalog without persisting anything.
///
/// # Errors
///
/// Returns an error if the link is invalid, the fetch fails, or the sheet
/// has no importable products.
pub(crate) async fn run_import(
    config: &AppConfig,
    sheets_url: &str,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = sheet_client(config)?.fetch_catalog(sheets_url).await?;
    for skipped in &catalog.skipped_rows {
        tracing::debug!(row = skipped.row, reason = skipped.reason, "row skipped");
    }
    tracing::info!(
        products = catalog.products.len(),
        skipped = catalog.skipped_rows.len(),
        "sheet imported"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print_catalog(&catalog);
    }
    Ok(())
}

/// Import a sheet and validate it into a publish plan.
///
/// Runs before any database connection is opened, so a bad link or an
/// unpublishable catalog never touches the database.
///
/// # Errors
///
/// Returns an error if the import fails, `colors` is malformed, or a publish
/// precondition is not met.
pub(crate) async fn plan_publish(
    config: &AppConfig,
    sheets_url: &str,
    name: &str,
    whatsapp: &str,
    theme: Option<&str>,
    colors: Option<&str>,
) -> anyhow::Result<PublishPlan> {
    let theme = theme.map(theme_from_arg);
    let colors = colors.map(colors_from_arg).transpose()?;
    let catalog = sheet_client(config)?.fetch_catalog(sheets_url).await?;

    let plan = prepare_publish(name, sheets_url, whatsapp, theme, colors, &catalog.products)?;
    Ok(plan)
}

/// Write a prepared plan as a new store.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub(crate) async fn run_publish(pool: &sqlx::PgPool, plan: &PublishPlan) -> anyhow::Result<()> {
    let store = sheetstore_db::publish_store(pool, plan)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "publish failed"))?;
    tracing::info!(
        store_id = store.id,
        products = plan.products.len(),
        "store published"
    );

    println!(
        "published store {} \"{}\" with {} product(s), theme {}{}",
        store.id,
        store.name,
        plan.products.len(),
        store.theme.map_or("default", PresetKind::as_str),
        if store.theme_colors.is_some() {
            " (custom colors)"
        } else {
            ""
        },
    );
    Ok(())
}
