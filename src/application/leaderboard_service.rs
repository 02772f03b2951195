// Leaderboard service - Use case for ranked DAO summaries
use crate::application::metrics_repository::MetricsRepository;
use crate::application::ranking::{rank, Page};
use crate::domain::dao::{EntitySummary, SortKey};
use std::sync::Arc;

#[derive(Clone)]
pub struct LeaderboardService {
    repository: Arc<dyn MetricsRepository>,
}

impl LeaderboardService {
    pub fn new(repository: Arc<dyn MetricsRepository>) -> Self {
        Self { repository }
    }

    /// Fetch one page of summaries and rank it by `key`.
    pub async fn leaderboard(
        &self,
        page: usize,
        page_size: usize,
        key: SortKey,
    ) -> anyhow::Result<Page<EntitySummary>> {
        let fetched = self.repository.fetch_entity_summaries(page, page_size).await?;
        tracing::debug!(page, items = fetched.items.len(), total = fetched.total, "summaries fetched");

        Ok(Page::from_server(rank(&fetched.items, key), page, page_size, fetched.total))
    }

    /// Re-sort the rows already on screen without another fetch.
    pub fn resort(page: Page<EntitySummary>, key: SortKey) -> Page<EntitySummary> {
        let items = rank(&page.items, key);
        Page { items, ..page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::metrics_repository::SummaryPage;
    use crate::domain::snapshot::SnapshotSeries;
    use async_trait::async_trait;

    struct StaticSummaries(Vec<EntitySummary>);

    #[async_trait]
    impl MetricsRepository for StaticSummaries {
        async fn fetch_history(&self, _: &str, _: &str, _: u32) -> anyhow::Result<SnapshotSeries> {
            anyhow::bail!("not used")
        }

        async fn fetch_entity_summaries(&self, page: usize, page_size: usize) -> anyhow::Result<SummaryPage> {
            let start = (page - 1) * page_size;
            Ok(SummaryPage {
                items: self.0.iter().skip(start).take(page_size).cloned().collect(),
                total: self.0.len(),
            })
        }
    }

    fn daos() -> Vec<EntitySummary> {
        vec![
            EntitySummary::new("a", 10.0, 5.0, 100.0),
            EntitySummary::new("b", 30.0, 1.0, 300.0),
            EntitySummary::new("c", 20.0, 9.0, 200.0),
            EntitySummary::new("d", 99.0, 0.0, 1.0),
        ]
    }

    fn ids(page: &Page<EntitySummary>) -> Vec<&str> {
        page.items.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_ranks_within_fetched_page() {
        let service = LeaderboardService::new(Arc::new(StaticSummaries(daos())));

        let page = service.leaderboard(1, 3, SortKey::ByFollowers).await.unwrap();

        assert_eq!(ids(&page), vec!["b", "c", "a"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_more);

        let last = service.leaderboard(2, 3, SortKey::ByFollowers).await.unwrap();
        assert_eq!(ids(&last), vec!["d"]);
        assert!(!last.has_more);
    }

    #[tokio::test]
    async fn test_resort_keeps_envelope() {
        let service = LeaderboardService::new(Arc::new(StaticSummaries(daos())));
        let page = service.leaderboard(1, 3, SortKey::ByFollowers).await.unwrap();

        let resorted = LeaderboardService::resort(page.clone(), SortKey::ByGrowthPct);

        assert_eq!(ids(&resorted), vec!["c", "a", "b"]);
        assert_eq!(resorted.total_pages, page.total_pages);
        assert_eq!(resorted.page, 1);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        struct Failing;

        #[async_trait]
        impl MetricsRepository for Failing {
            async fn fetch_history(&self, _: &str, _: &str, _: u32) -> anyhow::Result<SnapshotSeries> {
                anyhow::bail!("down")
            }

            async fn fetch_entity_summaries(&self, _: usize, _: usize) -> anyhow::Result<SummaryPage> {
                anyhow::bail!("down")
            }
        }

        let service = LeaderboardService::new(Arc::new(Failing));
        assert!(service.leaderboard(1, 10, SortKey::ByPosts).await.is_err());
    }
}
