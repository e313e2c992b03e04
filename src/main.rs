// src/main.rs
mod acquire;
mod extractors;
mod pipeline;
mod report;
mod utils;

use acquire::AcquireConfig;
use acquire::config::{
    DEFAULT_DOWNLOAD_DIR, DEFAULT_ELEMENT_LOCATOR, DEFAULT_EXPECTED_FILENAME,
    DEFAULT_TARGET_URL, DEFAULT_TIMEOUT_SECS,
};
use clap::Parser;
use extractors::MetricsExtractor;
use pipeline::PipelineOutcome;
use report::PngPieRenderer;
use std::path::PathBuf;
use utils::AppError;

/// Downloads a sustainability report, scrapes headline metrics and draws pie charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page that links to the report
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// CSS selector of the download link on that page
    #[arg(long, default_value = DEFAULT_ELEMENT_LOCATOR)]
    selector: String,

    /// Directory the report is saved to
    #[arg(long, default_value = DEFAULT_DOWNLOAD_DIR)]
    download_dir: PathBuf,

    /// File name the report is saved under
    #[arg(long, default_value = DEFAULT_EXPECTED_FILENAME)]
    filename: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Use an already downloaded report instead of fetching it
    #[arg(long)]
    skip_download: bool,

    /// Directory the chart PNGs are written to
    #[arg(long, default_value = "./charts")]
    chart_dir: PathBuf,

    /// TrueType font for chart text (defaults to a system font)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the extracted record as JSON
    #[arg(long)]
    print_record: bool,
}

impl Args {
    fn acquire_config(&self) -> AcquireConfig {
        AcquireConfig {
            target_url: self.url.clone(),
            element_locator: self.selector.clone(),
            download_dir: self.download_dir.clone(),
            expected_filename: self.filename.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);
    let config = args.acquire_config();

    // 3. Download (best effort; the existence check below decides what happens next)
    if args.skip_download {
        tracing::info!("Skipping download, expecting {}", config.expected_path().display());
    } else {
        match acquire::fetch_report(&config).await {
            Ok(path) => tracing::info!("Report available at {}", path.display()),
            Err(e) => tracing::error!("Failed to download report: {}", e),
        }
    }

    // 4. Extract and chart
    let extractor = MetricsExtractor::new();
    let mut renderer = PngPieRenderer::with_font(&args.chart_dir, args.font.as_deref());
    let mut stdout = std::io::stdout();

    match pipeline::process_report(&config.expected_path(), &extractor, &mut renderer, &mut stdout)? {
        PipelineOutcome::DocumentMissing => {}
        PipelineOutcome::Completed { record, charts_rendered, chart_paths } => {
            if args.print_record {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            tracing::info!(
                "Processing finished. Charts rendered: {} ({})",
                charts_rendered,
                chart_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    Ok(())
}
