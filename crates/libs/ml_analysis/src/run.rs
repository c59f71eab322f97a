use crate::AnalysisOutcome;
use crate::aggregator::aggregate;
use crate::analyzer::analyze_asset;
use crate::encoder::encode_asset;
use crate::sampler::{DEFAULT_SAMPLE_CAP, sample_batch};
use crate::synthesizer::synthesize_collection;
use common_types::{AnalysisResult, CollectionSummary, GlobalReportData};
use futures_util::{StreamExt, stream};
use language_model::StructuredGeneration;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Share of the progress bar reserved for per-asset analysis, the rest is for the synthesis.
const ANALYSIS_PROGRESS_SHARE: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Sampling,
    /// `index` is the zero-based position of the asset being waited on.
    AnalyzingAsset {
        index: usize,
        total: usize,
    },
    Synthesizing,
    Done,
    Cancelled,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStatus {
    pub phase: RunPhase,
    /// 0-100
    pub progress: u8,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub sample_cap: usize,
    /// Number of per-asset requests in flight at once, 1 is strictly sequential.
    pub concurrency: usize,
    pub id_length: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            concurrency: 1,
            id_length: 16,
        }
    }
}

/// State of one analysis run: the results gathered so far, the optional collection summary and
/// the progress published to observers.
pub struct AnalysisRun {
    options: RunOptions,
    status: watch::Sender<RunStatus>,
    results: Vec<AnalysisResult>,
    summary: Option<CollectionSummary>,
}

impl AnalysisRun {
    #[must_use]
    pub fn new(options: RunOptions) -> Self {
        let (status, _) = watch::channel(RunStatus {
            phase: RunPhase::Idle,
            progress: 0,
            message: String::new(),
        });
        Self {
            options,
            status,
            results: Vec::new(),
            summary: None,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RunStatus> {
        self.status.subscribe()
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    #[must_use]
    pub const fn summary(&self) -> Option<&CollectionSummary> {
        self.summary.as_ref()
    }

    /// Collection statistics for the current results, `None` while there are none.
    #[must_use]
    pub fn report(&self) -> Option<GlobalReportData> {
        aggregate(&self.results, self.summary.as_ref())
    }

    /// Forget all results. Requests that are still in flight belong to an `execute` call, cancel
    /// its token to stop them.
    pub fn reset(&mut self) {
        self.results.clear();
        self.summary = None;
        self.publish(RunPhase::Reset, 0, "Cleared".to_string());
    }

    /// Sample `batch`, analyze every sampled asset and summarize the survivors.
    ///
    /// Failing assets are logged and dropped, a failing summary is logged and left out. The
    /// returned phase is either `Done` or `Cancelled`.
    pub async fn execute<M: StructuredGeneration + ?Sized>(
        &mut self,
        model: &M,
        batch: Vec<PathBuf>,
        rng: &mut fastrand::Rng,
        cancel: &CancellationToken,
    ) -> RunPhase {
        self.results.clear();
        self.summary = None;

        self.publish(
            RunPhase::Sampling,
            0,
            format!("Sampling from {} uploaded assets", batch.len()),
        );
        let sample = sample_batch(batch, self.options.sample_cap, rng);
        let total = sample.len();
        if total == 0 {
            info!("No assets uploaded, nothing to analyze");
            return self.finish("No assets to analyze".to_string());
        }
        info!("Analyzing {total} sampled assets");

        let id_length = self.options.id_length;
        let mut analyses = std::pin::pin!(
            stream::iter(sample)
                .enumerate()
                .map(move |(index, path)| async move {
                    let outcome = analyze_path(model, &path, id_length).await;
                    (index, path, outcome)
                })
                .buffered(self.options.concurrency.max(1))
        );

        self.publish(
            RunPhase::AnalyzingAsset { index: 0, total },
            0,
            format!("Analyzing asset 1/{total}"),
        );
        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                next = analyses.next() => Some(next),
            };
            let Some(next) = next else {
                return self.cancel();
            };
            let Some((index, path, outcome)) = next else {
                break;
            };

            match outcome {
                Ok(result) => {
                    info!("Analyzed {} as {}", path.display(), result.id);
                    self.results.push(result);
                }
                Err(e) => warn!("Skipping {}: {e}", path.display()),
            }
            let done = index + 1;
            let progress = done * ANALYSIS_PROGRESS_SHARE / total;
            if done < total {
                self.publish(
                    RunPhase::AnalyzingAsset { index: done, total },
                    progress,
                    format!("Analyzing asset {}/{total}", done + 1),
                );
            }
        }

        if self.results.is_empty() {
            warn!("None of the {total} sampled assets could be analyzed, skipping summary");
            return self.finish("No asset could be analyzed".to_string());
        }

        self.publish(
            RunPhase::Synthesizing,
            ANALYSIS_PROGRESS_SHARE,
            "Synthesizing visual DNA".to_string(),
        );
        let synthesis = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            summary = synthesize_collection(model, &self.results) => Some(summary),
        };
        let Some(synthesis) = synthesis else {
            return self.cancel();
        };
        match synthesis {
            Ok(summary) => self.summary = Some(summary),
            Err(e) => warn!("Collection summary unavailable: {e}"),
        }

        let analyzed = self.results.len();
        self.finish(format!("Analyzed {analyzed} of {total} sampled assets"))
    }

    fn finish(&mut self, message: String) -> RunPhase {
        self.publish(RunPhase::Done, 100, message);
        RunPhase::Done
    }

    fn cancel(&mut self) -> RunPhase {
        info!(
            "Run cancelled with {} analysis results kept",
            self.results.len()
        );
        let progress = self.status.borrow().progress;
        self.publish(RunPhase::Cancelled, usize::from(progress), "Cancelled".to_string());
        RunPhase::Cancelled
    }

    fn publish(&self, phase: RunPhase, progress: usize, message: String) {
        let progress = u8::try_from(progress.min(100)).unwrap_or(100);
        self.status.send_replace(RunStatus {
            phase,
            progress,
            message,
        });
    }
}

async fn analyze_path<M: StructuredGeneration + ?Sized>(
    model: &M,
    path: &Path,
    id_length: usize,
) -> AnalysisOutcome<AnalysisResult> {
    let image = encode_asset(path).await?;
    analyze_asset(model, image, id_length).await
}
