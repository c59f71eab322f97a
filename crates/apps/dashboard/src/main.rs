mod render;

use app_state::{AppSettings, DEFAULT_SETTINGS_PATH, load_app_settings};
use clap::Parser;
use color_eyre::Result;
use language_model::VisionModelClient;
use ml_analysis::{AnalysisRun, RunOptions, RunPhase};
use render::{render_json, render_report};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Sample a batch of image assets, analyze each with a remote vision model and report on the
/// collection's visual style.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file.
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,
    /// Maximum number of assets to analyze, overrides `analysis.sample_cap`.
    #[arg(long)]
    cap: Option<usize>,
    /// Seed for the sampler, for reproducible samples.
    #[arg(long)]
    seed: Option<u64>,
    /// Print the report and results as JSON instead of text.
    #[arg(long, default_value_t = false, action)]
    json: bool,
    /// Image assets to sample from.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = load_app_settings(&args.config)?;

    // Logs go to stderr so `--json` output stays parseable.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let client = build_client(&settings)?;
    let mut run = AnalysisRun::new(RunOptions {
        sample_cap: args.cap.unwrap_or(settings.analysis.sample_cap).max(1),
        concurrency: settings.analysis.concurrency,
        id_length: settings.analysis.id_length,
    });

    let mut status = run.subscribe();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            info!("[{:>3}%] {}", current.progress, current.message);
        }
    });

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            on_interrupt.cancel();
        }
    });

    let mut rng = args
        .seed
        .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let phase = run.execute(&client, args.files, &mut rng, &cancel).await;
    if phase == RunPhase::Cancelled {
        warn!("Run was cancelled, reporting on {} results", run.results().len());
    }

    let report = run.report();
    if args.json {
        println!("{}", render_json(report.as_ref(), run.results())?);
    } else if let Some(report) = &report {
        print!("{}", render_report(report, run.results())?);
    } else {
        println!("No asset could be analyzed.");
    }

    Ok(())
}

fn build_client(settings: &AppSettings) -> Result<VisionModelClient> {
    let model = &settings.model;
    let client = VisionModelClient::with_base_url(&model.base_url)
        .model(model.model.clone())
        .maybe_api_key(settings.api_key())
        .temperature(model.temperature)
        .top_p(model.top_p)
        .timeout(model.request_timeout)
        .build()?;
    info!("Using model {} at {}", model.model, model.base_url);
    Ok(client)
}
