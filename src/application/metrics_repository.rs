// Repository trait for growth metrics data access
use crate::domain::dao::EntitySummary;
use crate::domain::snapshot::SnapshotSeries;
use async_trait::async_trait;

/// One page of DAO summaries as returned by the summaries endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPage {
    pub items: Vec<EntitySummary>,
    pub total: usize,
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Snapshot history of `metric` for one series over the last `range_days`
    async fn fetch_history(
        &self,
        series_id: &str,
        metric: &str,
        range_days: u32,
    ) -> anyhow::Result<SnapshotSeries>;

    /// One page of DAO summaries (1-based page)
    async fn fetch_entity_summaries(&self, page: usize, page_size: usize) -> anyhow::Result<SummaryPage>;
}
