// Chart service - progressive loading of one chart, one concurrent fetch per series
use crate::application::chart_assembler::ChartAssembler;
use crate::application::metrics_repository::MetricsRepository;
use crate::domain::chart::ChartFrame;
use crate::domain::selection::SelectionToken;
use crate::domain::snapshot::SnapshotSeries;
use crate::domain::view::ViewKind;
use crate::infrastructure::config::SeriesConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

struct FetchOutcome {
    series_id: String,
    result: anyhow::Result<SnapshotSeries>,
}

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn MetricsRepository>,
}

impl ChartService {
    pub fn new(repository: Arc<dyn MetricsRepository>) -> Self {
        Self { repository }
    }

    /// Fetch every series for the selection in `token` concurrently.
    ///
    /// The receiver first gets a frame with nothing resolved, then one freshly
    /// recomputed frame per settled fetch. The channel closes once every fetch
    /// has settled. Frames carry `token`; callers drop frames whose token is no
    /// longer current.
    pub fn stream_chart(
        &self,
        token: SelectionToken,
        series: &[SeriesConfig],
        view: ViewKind,
    ) -> mpsc::Receiver<ChartFrame> {
        let (tx, rx) = mpsc::channel(series.len() + 1);
        let started = Instant::now();

        let Some(metric) = token.metric.clone() else {
            tracing::info!(platform = %token.platform, "no metric selected, nothing to fetch");
            let frame = ChartAssembler::new(token, view, Vec::<String>::new()).frame();
            // capacity is at least one
            let _ = tx.try_send(frame);
            return rx;
        };

        let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(series.len().max(1));

        // 1. Spawn one fetch per series
        for series_config in series {
            let outcome_tx = outcome_tx.clone();
            let repo = self.repository.clone();
            let series_id = series_config.id.clone();
            let label = series_config.label.clone();
            let metric = metric.clone();
            let range_days = token.range_days;

            tokio::spawn(async move {
                let result = repo
                    .fetch_history(&series_id, &metric, range_days)
                    .await
                    .map(|mut fetched| {
                        fetched.label = label;
                        fetched
                    });
                let _ = outcome_tx.send(FetchOutcome { series_id, result }).await;
            });
        }
        drop(outcome_tx);

        // 2. Assemble as results arrive
        let mut assembler = ChartAssembler::new(
            token.clone(),
            view,
            series.iter().map(|s| s.id.clone()),
        );
        tokio::spawn(async move {
            if tx.send(assembler.frame()).await.is_err() {
                return;
            }

            while let Some(outcome) = outcome_rx.recv().await {
                match outcome.result {
                    Ok(fetched) => {
                        tracing::debug!(
                            series_id = %outcome.series_id,
                            points = fetched.len(),
                            "series resolved"
                        );
                        assembler.resolve(&token, &outcome.series_id, fetched);
                    }
                    Err(e) => {
                        tracing::warn!(
                            series_id = %outcome.series_id,
                            error = %e,
                            "series fetch failed, leaving it out of the chart"
                        );
                        assembler.fail(&token, &outcome.series_id);
                    }
                }

                if tx.send(assembler.frame()).await.is_err() {
                    tracing::debug!("chart receiver dropped, abandoning assembly");
                    return;
                }
            }

            tracing::info!(
                platform = %token.platform,
                generation = token.generation,
                duration_ms = started.elapsed().as_millis() as u64,
                "chart assembled"
            );
        });

        rx
    }
}
