//! jobscout-ingest - scrape job listings into a CSV file

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobscout_common::logging::{init_logging, LogConfig, LogLevel};
use jobscout_ingest::{fetcher::DEFAULT_MAX_PAGES, CsvSink, Paginator, ScrapeConfig, SearchQuery};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "jobscout-ingest")]
#[command(author, version, about = "Job listing scraper")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape search results and save them to CSV
    Scrape {
        /// Job title or keywords
        #[arg(short, long)]
        position: String,

        /// City or region
        #[arg(short, long)]
        city: String,

        /// Only jobs posted within this many days
        #[arg(short, long)]
        date_posted: Option<String>,

        /// Maximum number of result pages
        #[arg(short, long, default_value_t = DEFAULT_MAX_PAGES)]
        max_pages: u32,

        /// Output CSV file
        #[arg(short, long, env = "SCRAPER_CSV_PATH")]
        output: Option<PathBuf>,

        /// Site origin
        #[arg(long, env = "SCRAPER_BASE_URL")]
        base_url: Option<String>,

        /// Delay between page requests, in milliseconds
        #[arg(long, env = "SCRAPER_PAGE_DELAY_MS")]
        delay_ms: Option<u64>,

        /// Per-request timeout, in seconds
        #[arg(long, env = "SCRAPER_TIMEOUT_SECS")]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("jobscout-ingest")
        .build()
        .with_env_overrides()?;

    let _guard = init_logging(&log_config)?;

    match cli.command {
        Command::Scrape {
            position,
            city,
            date_posted,
            max_pages,
            output,
            base_url,
            delay_ms,
            timeout_secs,
        } => {
            let mut config = ScrapeConfig::default();
            if let Some(output) = output {
                config = config.with_csv_path(output);
            }
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url);
            }
            if let Some(delay_ms) = delay_ms {
                config = config.with_page_delay_ms(delay_ms);
            }
            if let Some(timeout_secs) = timeout_secs {
                config = config.with_timeout_secs(timeout_secs);
            }

            let mut query = SearchQuery::new(position, city).with_max_pages(max_pages);
            query.date_posted = date_posted;

            let sink = CsvSink::new(&config.csv_path);
            let paginator = Paginator::new(config)?;

            info!(position = %query.position, city = %query.city, "Starting scrape");
            let report = paginator.run(&query, &sink).await?;

            if report.success {
                println!("Saved {} jobs to {}", report.count, sink.path().display());
            } else {
                println!("No jobs found; nothing written");
            }
        },
    }

    Ok(())
}
