// Main entry point - Dependency injection and one dashboard render
use std::sync::Arc;

use futures::StreamExt;

use growth_dashboard::application::chart_service::ChartService;
use growth_dashboard::application::leaderboard_service::LeaderboardService;
use growth_dashboard::domain::selection::{MetricSelectionController, SelectionEvent, SelectionSignal};
use growth_dashboard::infrastructure::chart_payload::{chart_to_json, leaderboard_to_json};
use growth_dashboard::infrastructure::config::load_dashboard_config;
use growth_dashboard::infrastructure::http_repository::HttpMetricsRepository;
use tokio_stream::wrappers::ReceiverStream;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for payloads
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let settings = &config.dashboard;
    if !settings.range_presets.contains(&settings.default_range_days) {
        tracing::warn!(
            default_range_days = settings.default_range_days,
            presets = ?settings.range_presets,
            "default range is not one of the offered presets"
        );
    }

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpMetricsRepository::new(&config.api)?);

    // Create services (application layer)
    let chart_service = ChartService::new(repository.clone());
    let leaderboard_service = LeaderboardService::new(repository);

    // Mount the selection controller on the configured platform
    let mut controller = MetricSelectionController::new(
        config.catalog(),
        settings.platform.clone(),
        settings.default_range_days,
    );
    let signals = controller.apply(SelectionEvent::InitialMount)?;

    let token = signals
        .into_iter()
        .find_map(|signal| match signal {
            SelectionSignal::Reload(token) => Some(token),
            SelectionSignal::InvalidateCache { .. } => None,
        })
        .unwrap_or_else(|| controller.token());

    tracing::info!(
        platform = %token.platform,
        metric = ?token.metric,
        range_days = token.range_days,
        "rendering dashboard"
    );

    let rx = chart_service.stream_chart(token.clone(), config.series_for(&token.platform), settings.view);
    let mut frames = ReceiverStream::new(rx);
    while let Some(frame) = frames.next().await {
        if !controller.is_current(&frame.token) {
            continue;
        }
        println!("{}", chart_to_json(frame)?);
    }

    let page = leaderboard_service
        .leaderboard(1, settings.page_size, settings.sort)
        .await?;
    println!("{}", leaderboard_to_json(&page)?);

    Ok(())
}
