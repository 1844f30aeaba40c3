mod add;
mod render;

#[cfg(test)]
mod tests;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stockr_client::{Dashboard, InventoryClient};
use stockr_core::{AppConfig, Category, ProductStatus};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockr")]
#[command(about = "Reseller inventory dashboard")]
struct Cli {
    /// Backend base URL (overrides STOCKR_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show KPIs and the full inventory (default)
    Dashboard,
    /// Show only the KPI tiles
    Kpis,
    /// Show only the inventory grid
    Products,
    /// Add an item to the inventory
    Add {
        /// Product name
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: Option<String>,
        /// Variant or size, e.g. "EU 43"
        #[arg(long)]
        variant: Option<String>,
        /// Sneaker, TCG or Streetwear
        #[arg(long, default_value = "Sneaker")]
        category: Category,
        /// Purchase price; blank or non-numeric counts as 0
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
        /// Purchase date as YYYY-MM-DD (defaults to now)
        #[arg(long)]
        date: Option<String>,
        /// In Stock, Listed or Sold
        #[arg(long, default_value = "In Stock")]
        status: ProductStatus,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Preview the break-even sale price for a purchase price
    Breakeven {
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = stockr_core::load_app_config()?;
    if let Some(url) = cli.backend_url.as_deref() {
        stockr_core::override_backend_url(&mut config, url)?;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, backend = %config.backend_url, "config loaded");

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => run_dashboard(&config, View::Full).await,
        Commands::Kpis => run_dashboard(&config, View::Kpis).await,
        Commands::Products => run_dashboard(&config, View::Products).await,
        Commands::Add {
            name,
            sku,
            variant,
            category,
            price,
            date,
            status,
            image_url,
        } => {
            let form = stockr_core::ItemForm {
                name,
                sku: sku.unwrap_or_default(),
                variant: variant.unwrap_or_default(),
                category,
                purchase_price: price.unwrap_or_default(),
                purchase_date: date.unwrap_or_default(),
                status,
                image_url: image_url.unwrap_or_default(),
            };
            add::run_add(&config, form).await
        }
        Commands::Breakeven { price } => {
            println!("{}", render::breakeven_line(&config.pricing, &price));
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Full,
    Kpis,
    Products,
}

fn connect(config: &AppConfig) -> anyhow::Result<Dashboard> {
    let client = InventoryClient::from_config(config)
        .with_context(|| format!("failed to build client for {}", config.backend_url))?;
    Ok(Dashboard::new(client))
}

/// Refreshes once and prints the requested view. A failed refresh still
/// prints the view (with its error banner) before exiting non-zero.
async fn run_dashboard(config: &AppConfig, view: View) -> anyhow::Result<()> {
    let mut dashboard = connect(config)?;
    let refreshed = dashboard.refresh().await;

    let output = match view {
        View::Full => render::dashboard(&dashboard),
        View::Kpis => render::kpi_section(&dashboard),
        View::Products => render::product_section(&dashboard),
    };
    println!("{output}");

    refreshed.with_context(|| format!("could not load data from {}", config.backend_url))
}
