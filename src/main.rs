use analytics::Distribution;
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Settings, SourceKind, load_config};
use core_types::FilterCriteria;
use core_types::criteria::parse_weekday;
use loader::{DatasetLoader, HttpSource, source_from_settings};
use std::path::PathBuf;
use std::time::Duration;
use view::{View, ViewComposer};

/// Entry point for the breakout box statistics tool.
#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry IVB_* overrides; it is optional.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    cli.overrides.apply(&mut settings);
    settings
        .validate()
        .context("Invalid source after command-line overrides")?;

    // Keep the guard alive until exit so the file writer flushes.
    let _guard = configuration::init_logging(&settings.logging)?;

    match cli.command {
        Commands::View(args) => handle_view(args, &settings).await?,
        Commands::Tickers => handle_tickers(&settings).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Filter breakout box events and print their distributions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, short, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: SourceOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the boxes, apply the facet filters and print every distribution.
    View(ViewArgs),
    /// List the tickers the source holds boxes for.
    Tickers,
}

/// Command-line replacements for the `[source]` settings.
#[derive(Args)]
struct SourceOverrides {
    /// Transport to load from.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Read a CSV export instead of the configured source.
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Base URL of the box store.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Server-side ticker selection (e.g., "NQ=F").
    #[arg(long, global = true)]
    ticker: Option<String>,

    /// Server-side dataset selection.
    #[arg(long, global = true)]
    dataset: Option<String>,
}

impl SourceOverrides {
    fn apply(&self, settings: &mut Settings) {
        let source = &mut settings.source;
        if let Some(path) = &self.csv {
            source.kind = SourceKind::Csv;
            source.csv_path = Some(path.clone());
        }
        if let Some(url) = &self.url {
            source.kind = SourceKind::Http;
            source.base_url = Some(url.clone());
        }
        if let Some(kind) = self.source {
            source.kind = kind;
        }
        if self.ticker.is_some() {
            source.ticker = self.ticker.clone();
        }
        if self.dataset.is_some() {
            source.dataset = self.dataset.clone();
        }
    }
}

#[derive(Args)]
struct ViewArgs {
    /// Day of week, 0 = Sunday through 6 = Saturday. Blank means any day.
    #[arg(long)]
    weekday: Option<String>,
    /// Substring of the session date (e.g., "2023-07").
    #[arg(long)]
    date: Option<String>,
    /// Keep only boxes of this ticker (client-side).
    #[arg(long = "only-ticker")]
    only_ticker: Option<String>,
    /// Breakout direction (e.g., "up").
    #[arg(long)]
    breakout: Option<String>,
    /// Substring of the breakout time (e.g., "09:3").
    #[arg(long)]
    breakout_time: Option<String>,
    /// Confirmation state ("true" or "false").
    #[arg(long)]
    confirm: Option<String>,
    /// Substring of the confirmation time.
    #[arg(long)]
    confirm_time: Option<String>,
    #[arg(long)]
    inverse_breakout: Option<String>,
    #[arg(long)]
    inverse_breakout_time: Option<String>,
    #[arg(long)]
    inverse_confirm: Option<String>,
    #[arg(long)]
    inverse_confirm_time: Option<String>,
    /// Print the view as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

impl ViewArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        Ok(FilterCriteria {
            weekday: match &self.weekday {
                Some(input) => parse_weekday(input)?,
                None => None,
            },
            date: self.date.clone(),
            ticker: self.only_ticker.clone(),
            breakout: self.breakout.clone(),
            breakout_time: self.breakout_time.clone(),
            confirm: self.confirm.clone(),
            confirm_time: self.confirm_time.clone(),
            inverse_breakout: self.inverse_breakout.clone(),
            inverse_breakout_time: self.inverse_breakout_time.clone(),
            inverse_confirm: self.inverse_confirm.clone(),
            inverse_confirm_time: self.inverse_confirm_time.clone(),
        })
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_view(args: ViewArgs, settings: &Settings) -> Result<()> {
    let criteria = args.criteria()?;
    let source = source_from_settings(&settings.source)?;

    let loader = DatasetLoader::new();
    let state = loader.load(source).await;
    let Some(dataset) = state.dataset() else {
        bail!("No box records could be loaded; see the log for the cause");
    };

    tracing::info!(facets = criteria.active_facets(), "Computing view.");
    let view = ViewComposer::new().compute(dataset, &criteria);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

async fn handle_tickers(settings: &Settings) -> Result<()> {
    let tickers = match settings.source.kind {
        SourceKind::Http => {
            let base_url = settings.source.base_url.clone().unwrap_or_default();
            let client = HttpSource::new(base_url, Duration::from_secs(settings.source.timeout_secs))?;
            client.fetch_tickers().await?
        }
        // A file has no index; the tickers are whatever the export contains.
        SourceKind::Csv => {
            let source = source_from_settings(&settings.source)?;
            let state = DatasetLoader::new().load(source).await;
            let Some(dataset) = state.dataset() else {
                bail!("No box records could be loaded; see the log for the cause");
            };
            dataset.tickers().into_iter().map(String::from).collect()
        }
    };

    for ticker in tickers {
        println!("{ticker}");
    }
    Ok(())
}

fn print_view(view: &View) {
    println!("Matched {} of {} boxes", view.matched(), view.total);
    for (name, distribution) in view.distributions.iter() {
        println!();
        println!("{name}");
        println!("{}", distribution_table(distribution));
    }
}

fn distribution_table(distribution: &Distribution) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Bucket", "Count"]);
    for bucket in &distribution.buckets {
        table.add_row(vec![bucket.name.clone(), bucket.value.to_string()]);
    }
    table
}
