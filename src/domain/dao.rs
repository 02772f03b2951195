// DAO summary domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub follower_count: f64,
    #[serde(default)]
    pub follower_growth_pct: f64,
    #[serde(default)]
    pub total_posts: f64,
}

impl EntitySummary {
    pub fn new(
        id: impl Into<String>,
        follower_count: f64,
        follower_growth_pct: f64,
        total_posts: f64,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            follower_count,
            follower_growth_pct,
            total_posts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    ByFollowers,
    ByGrowthPct,
    ByPosts,
}

impl SortKey {
    pub fn value_of(self, entity: &EntitySummary) -> f64 {
        match self {
            SortKey::ByFollowers => entity.follower_count,
            SortKey::ByGrowthPct => entity.follower_growth_pct,
            SortKey::ByPosts => entity.total_posts,
        }
    }
}
