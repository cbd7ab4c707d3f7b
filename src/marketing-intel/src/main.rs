//! Marketing Intelligence — command-line front end for the dashboard pipeline.
//!
//! Resolves filter choices from flags, runs the pipeline once and prints the
//! report as JSON or a plain-text summary.

mod render;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use intel_core::config::AppConfig;
use intel_core::Normalizer;
use intel_reporting::{DashboardPipeline, DateSelection, FilterOptions, FilterQuery};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "marketing-intel")]
#[command(about = "Marketing spend, ROAS and CAC reporting over per-channel exports")]
#[command(version)]
struct Cli {
    /// Config file (TOML); environment variables override it
    #[arg(long, env = "MARKETING_INTEL_CONFIG")]
    config: Option<String>,

    /// Directory holding the channel and business CSV files (overrides config)
    #[arg(long, env = "MARKETING_INTEL__SOURCES__DATA_DIR")]
    data_dir: Option<String>,

    /// Fixed seed for the synthetic fallback data (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute KPIs and channel/day summaries for a filtered view
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the channels, regions and date span available for filtering
    Options,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// First day of the range (inclusive)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Last day of the range (inclusive)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Channel to include; repeat for several (default: all)
    #[arg(long = "channel")]
    channels: Vec<String>,

    /// Region to include; repeat for several (default: all)
    #[arg(long = "region")]
    regions: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    Normalizer::parse_date(value).map_err(|e| e.to_string())
}

impl FilterArgs {
    fn into_query(self) -> FilterQuery {
        let mut query = FilterQuery::default();

        let picked: Vec<NaiveDate> = self.start.into_iter().chain(self.end).collect();
        if !picked.is_empty() {
            query = query.with_dates(DateSelection::from_picked(&picked));
        }
        if !self.channels.is_empty() {
            query = query.with_channels(self.channels);
        }
        if !self.regions.is_empty() {
            query = query.with_regions(self.regions);
        }
        query
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketing_intel=info,intel_ingest=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(dir) = cli.data_dir {
        config.sources.data_dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.synthetic.seed = Some(seed);
    }

    info!(
        data_dir = %config.sources.data_dir,
        channels = config.sources.channels.len(),
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    let pipeline = DashboardPipeline::from_config(&config)?;

    match cli.command {
        Commands::Report { filters, format } => {
            let report = pipeline.run(&filters.into_query())?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print!("{}", render::report_text(&report)),
            }
        }
        Commands::Options => {
            let loaded = pipeline.load()?;
            let options = FilterOptions::from_dataset(&loaded.dataset);
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }

    Ok(())
}
