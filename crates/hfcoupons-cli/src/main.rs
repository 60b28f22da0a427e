use anyhow::Context;
use clap::{Parser, Subcommand};
use hfcoupons_core::AppConfig;
use hfcoupons_scraper::{system_prompt, to_llm_context, CouponClient};
use tracing_subscriber::EnvFilter;

/// Number of coupons previewed by `scrape` when `--limit` is not given.
const DEFAULT_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "hfcoupons")]
#[command(about = "Harbor Freight coupon scraper and assistant context builder")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print how many listing pages the coupon site advertises
    Pages,
    /// Scrape every listing page and preview the results
    Scrape {
        /// Number of coupons to include in the preview
        #[arg(long, default_value_t = DEFAULT_PREVIEW_LIMIT)]
        limit: usize,
        /// Print the previewed coupons as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Print the markdown context for every current coupon
    Context,
    /// Print the full assistant system prompt
    Prompt,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = hfcoupons_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config);

    let client = CouponClient::from_config(&config).context("failed to build coupon client")?;

    match cli.command {
        Some(Commands::Pages) => run_pages(&client).await,
        Some(Commands::Scrape { limit, json }) => run_scrape(&client, &config, limit, json).await,
        Some(Commands::Context) => run_context(&client, &config).await,
        Some(Commands::Prompt) => run_prompt(&client, &config).await,
        None => run_scrape(&client, &config, DEFAULT_PREVIEW_LIMIT, false).await,
    }
}

/// `RUST_LOG` wins when set; otherwise the configured log level applies.
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_pages(client: &CouponClient) -> anyhow::Result<()> {
    let total_pages = client
        .discover_total_pages()
        .await
        .with_context(|| format!("failed to discover page count at {}", client.base_url()))?;
    println!("Detected {total_pages} pages of coupons");
    Ok(())
}

async fn run_scrape(
    client: &CouponClient,
    config: &AppConfig,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let report = client
        .scrape_all_report(config.inter_page_delay_ms)
        .await
        .context("coupon scrape failed")?;

    println!("Detected {} pages of coupons", report.total_pages);
    println!("Found {} coupons", report.coupons.len());
    if report.skipped() > 0 {
        println!(
            "Skipped {} articles ({} not coupons, {} incomplete)",
            report.skipped(),
            report.non_coupon,
            report.malformed
        );
    }

    let preview = &report.coupons[..limit.min(report.coupons.len())];
    if json {
        let rendered =
            serde_json::to_string_pretty(preview).context("failed to serialize coupons")?;
        println!("{rendered}");
    } else {
        println!("\n{}", "=".repeat(50));
        println!("{}", to_llm_context(preview));
    }
    Ok(())
}

async fn run_context(client: &CouponClient, config: &AppConfig) -> anyhow::Result<()> {
    let coupons = client
        .scrape_all(config.inter_page_delay_ms)
        .await
        .context("coupon scrape failed")?;
    println!("{}", to_llm_context(&coupons));
    Ok(())
}

async fn run_prompt(client: &CouponClient, config: &AppConfig) -> anyhow::Result<()> {
    let coupons = client
        .scrape_all(config.inter_page_delay_ms)
        .await
        .context("coupon scrape failed")?;
    println!("{}", system_prompt(&to_llm_context(&coupons)));
    Ok(())
}
