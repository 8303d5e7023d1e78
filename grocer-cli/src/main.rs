//! Grocer CLI
//!
//! Terminal dashboard for the Smart Grocery analytics service.

mod render;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::MissedTickBehavior;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use grocer_client::{AnalyticsClient, ClientConfig};
use grocer_core::{DEFAULT_PRODUCTS_LIMIT, DEFAULT_TOP_PRODUCTS_LIMIT, FORECAST_WAIT};
use grocer_dashboard::{load_forecast, system_metrics, DashboardStore};

/// Grocer - Smart Grocery analytics dashboard
#[derive(Parser)]
#[command(name = "grocer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analytics service base URL
    #[arg(long, global = true, env = "GROCER_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "GROCER_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Always go to the network, even for cacheable queries
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stats, best sellers and the 7-day forecast
    Dashboard {
        /// Re-render every SECS seconds until Ctrl-C
        #[arg(short, long, value_name = "SECS")]
        watch: Option<u64>,
    },

    /// Store-wide sales statistics
    Stats,

    /// Best-selling products
    TopProducts {
        #[arg(short, long, default_value_t = DEFAULT_TOP_PRODUCTS_LIMIT)]
        limit: u32,
    },

    /// Product listing
    Products {
        #[arg(short, long, default_value_t = DEFAULT_PRODUCTS_LIMIT)]
        limit: u32,
    },

    /// 7-day sales forecast (store-wide, per product or per category)
    Forecast {
        /// Forecast a single product
        #[arg(long, conflicts_with = "category")]
        product: Option<u64>,
        /// Forecast a product category
        #[arg(long)]
        category: Option<u64>,
    },

    /// Stock recommendation for a product
    Stock {
        product_id: u64,
    },

    /// Sales report between two dates (YYYY-MM-DD, inclusive)
    Sales {
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Forecasting model information
    Performance,

    /// Download a plot image
    Plot {
        #[arg(value_enum)]
        kind: PlotKind,
        /// Output file (defaults to <kind>-plot.png)
        #[arg(short, long, conflicts_with = "url_only")]
        output: Option<PathBuf>,
        /// Print the image URL instead of downloading
        #[arg(long)]
        url_only: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlotKind {
    Forecast,
    Compare,
}

impl PlotKind {
    fn default_file(self) -> PathBuf {
        match self {
            PlotKind::Forecast => PathBuf::from("forecast-plot.png"),
            PlotKind::Compare => PathBuf::from("compare-plot.png"),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "grocer=debug,info"
    } else {
        "grocer=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("\n{} {:#}", "❌ Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Dashboard { watch } => cmd_dashboard(&client, watch, cli.verbose).await,
        Commands::Stats => cmd_stats(&client).await,
        Commands::TopProducts { limit } => cmd_top_products(&client, limit).await,
        Commands::Products { limit } => cmd_products(&client, limit).await,
        Commands::Forecast { product, category } => cmd_forecast(&client, product, category).await,
        Commands::Stock { product_id } => cmd_stock(&client, product_id).await,
        Commands::Sales { start, end } => cmd_sales(&client, start, end).await,
        Commands::Performance => cmd_performance(&client).await,
        Commands::Plot {
            kind,
            output,
            url_only,
        } => cmd_plot(&client, kind, output, url_only).await,
    }
}

fn build_client(cli: &Cli) -> Result<AnalyticsClient> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }
    if let Some(seconds) = cli.timeout {
        config = config.with_timeout(seconds);
    }
    if cli.no_cache {
        config = config.no_cache();
    }

    AnalyticsClient::with_config(config).context("Invalid client configuration")
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Render the dashboard once, or on an interval
async fn cmd_dashboard(client: &AnalyticsClient, watch: Option<u64>, verbose: bool) -> Result<()> {
    let store = DashboardStore::new();

    let Some(seconds) = watch else {
        return render_dashboard(client, &store, verbose).await;
    };

    println!(
        "{} every {}s, press Ctrl+C to stop.",
        "👀 Watching dashboard".cyan().bold(),
        seconds.max(1)
    );

    let store = &store;
    watch_until(
        Duration::from_secs(seconds.max(1)),
        tokio::signal::ctrl_c(),
        || async move {
            // A failed round keeps the last good data on screen
            if let Err(e) = render_dashboard(client, store, verbose).await {
                warn!(error = %e, "Dashboard refresh failed");
                println!("{} {:#}", "⚠️  Refresh failed:".yellow(), e);
            }
        },
    )
    .await;

    println!("\n{}", "Stopped.".dimmed());
    Ok(())
}

/// Runs `round` every `period` until `shutdown` resolves, returning the
/// number of completed rounds. A round in flight is dropped on shutdown.
async fn watch_until<S, F, Fut>(period: Duration, shutdown: S, mut round: F) -> usize
where
    S: Future,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut rounds = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => return rounds,
            _ = ticker.tick() => {}
        }
        tokio::select! {
            _ = &mut shutdown => return rounds,
            _ = round() => rounds += 1,
        }
    }
}

async fn render_dashboard(client: &AnalyticsClient, store: &DashboardStore, verbose: bool) -> Result<()> {
    let pb = spinner("Loading dashboard...")?;
    let refreshed = store.refresh(client).await;
    let forecast = load_forecast(client, FORECAST_WAIT).await;
    pb.finish_and_clear();

    refreshed.context("Failed to load dashboard data")?;

    println!("{}", render::dashboard(&store.snapshot(), &forecast));
    if verbose {
        if let Some(stats) = client.cache_stats() {
            println!("{}", render::cache_stats(&stats));
        }
    }
    Ok(())
}

async fn cmd_stats(client: &AnalyticsClient) -> Result<()> {
    let stats = client.stats().await.context("Failed to load statistics")?;
    print!("{}", render::stats(&stats));
    Ok(())
}

async fn cmd_top_products(client: &AnalyticsClient, limit: u32) -> Result<()> {
    let products = client
        .top_products(limit)
        .await
        .context("Failed to load best sellers")?;
    print!("{}", render::top_products(&products));
    Ok(())
}

async fn cmd_products(client: &AnalyticsClient, limit: u32) -> Result<()> {
    let products = client.products(limit).await.context("Failed to load products")?;
    print!("{}", render::products(&products));
    Ok(())
}

async fn cmd_forecast(client: &AnalyticsClient, product: Option<u64>, category: Option<u64>) -> Result<()> {
    let pb = spinner("Running forecast model...")?;

    let rendered = match (product, category) {
        (Some(id), _) => client
            .product_forecast(id)
            .await
            .map(|f| render::product_forecast(&f))
            .with_context(|| format!("Failed to forecast product {}", id)),
        (None, Some(id)) => client
            .category_forecast(id)
            .await
            .map(|f| render::category_forecast(&f))
            .with_context(|| format!("Failed to forecast category {}", id)),
        (None, None) => Ok(render::forecast(&load_forecast(client, FORECAST_WAIT).await)),
    };

    pb.finish_and_clear();
    print!("{}", rendered?);
    Ok(())
}

async fn cmd_stock(client: &AnalyticsClient, product_id: u64) -> Result<()> {
    let pb = spinner("Computing stock recommendation...")?;
    let rec = client.stock_recommendation(product_id).await;
    pb.finish_and_clear();

    let rec = rec.with_context(|| format!("Failed to load stock recommendation for product {}", product_id))?;
    print!("{}", render::stock(&rec));
    Ok(())
}

async fn cmd_sales(client: &AnalyticsClient, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let report = client
        .sales_by_date_range(start, end)
        .await
        .context("Failed to load sales report")?;
    print!("{}", render::sales(&report));
    Ok(())
}

async fn cmd_performance(client: &AnalyticsClient) -> Result<()> {
    let perf = client
        .model_performance()
        .await
        .context("Failed to load model performance")?;
    print!("{}", render::metrics(&system_metrics(&perf)));

    if let Some(fallbacks) = perf.performance_metrics.as_ref().map(|m| &m.fallback_models) {
        if !fallbacks.is_empty() {
            println!("   {} {}", "Fallback models:".dimmed(), fallbacks.join(", "));
        }
    }
    Ok(())
}

async fn cmd_plot(client: &AnalyticsClient, kind: PlotKind, output: Option<PathBuf>, url_only: bool) -> Result<()> {
    if url_only {
        let url = match kind {
            PlotKind::Forecast => client.forecast_plot_url()?,
            PlotKind::Compare => client.compare_plot_url()?,
        };
        println!("{}", url);
        return Ok(());
    }

    let pb = spinner("Rendering plot...")?;
    let image = match kind {
        PlotKind::Forecast => client.forecast_plot().await,
        PlotKind::Compare => client.compare_plot().await,
    };
    pb.finish_and_clear();

    let image = image.context("Failed to download plot")?;
    let path = output.unwrap_or_else(|| kind.default_file());
    save_plot(&path, &image)?;

    println!("{} {} ({} bytes)", "✅ Plot saved to:".green(), path.display(), image.len());
    Ok(())
}

fn save_plot(path: &Path, image: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, image).with_context(|| format!("Failed to write {}", path.display()))
}
