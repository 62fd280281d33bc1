mod catalog;
mod order;
mod theme;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sheetstore-cli")]
#[command(about = "Turn a shared spreadsheet into a storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a shared sheet and print the catalog it produces
    Import {
        /// Share link of the sheet
        sheets_url: String,

        /// Print the catalog as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Import a sheet and publish it as a new store
    Publish {
        /// Share link of the sheet
        sheets_url: String,

        /// Store name; defaults to "My Store"
        #[arg(long, default_value = "")]
        name: String,

        /// Contact number buyers send orders to
        #[arg(long)]
        whatsapp: String,

        /// Preset key or a free-text style request
        #[arg(long)]
        theme: Option<String>,

        /// Custom palette as "background,foreground,primary,secondary,accent"
        /// hex colors; replaces the preset's colors
        #[arg(long)]
        colors: Option<String>,
    },
    /// Resolve a style request to a preset and print its CSS
    Theme {
        /// Free-text request, e.g. "clean and minimal"
        prompt: Vec<String>,
    },
    /// Compose an order for a published store and print the deep link
    Order {
        store_id: i64,

        /// Product ids as shown by the storefront
        #[arg(required = true)]
        product_ids: Vec<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

async fn connect(config: &sheetstore_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = sheetstore_db::PoolConfig::from_app_config(config);
    let pool = sheetstore_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("sheetstore-cli: run with --help to list commands");
        return Ok(());
    };

    // Theme resolution is pure; every other command needs configuration.
    match command {
        Commands::Theme { prompt } => theme::run_theme(&prompt.join(" ")),
        Commands::Import { sheets_url, json } => {
            let config = sheetstore_core::load_app_config()?;
            catalog::run_import(&config, &sheets_url, json).await?;
        }
        Commands::Publish {
            sheets_url,
            name,
            whatsapp,
            theme,
            colors,
        } => {
            let config = sheetstore_core::load_app_config()?;
            let plan = catalog::plan_publish(
                &config,
                &sheets_url,
                &name,
                &whatsapp,
                theme.as_deref(),
                colors.as_deref(),
            )
            .await?;
            let pool = connect(&config).await?;
            sheetstore_db::run_migrations(&pool).await?;
            catalog::run_publish(&pool, &plan).await?;
        }
        Commands::Order {
            store_id,
            product_ids,
        } => {
            let config = sheetstore_core::load_app_config()?;
            let pool = connect(&config).await?;
            order::run_order(&pool, &config, store_id, product_ids).await?;
        }
        Commands::Migrate => {
            let config = sheetstore_core::load_app_config()?;
            let pool = connect(&config).await?;
            let applied = sheetstore_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
    }

    Ok(())
}
