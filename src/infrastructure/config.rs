use crate::domain::dao::SortKey;
use crate::domain::platform::{MetricCatalog, PlatformMetrics};
use crate::domain::view::ViewKind;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub platforms: Vec<PlatformConfig>,
}

/// Upstream analytics API the fetch layer talks to.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_history_path")]
    pub history_path: String,
    #[serde(default = "default_summaries_path")]
    pub summaries_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_history_path() -> String {
    "/metrics/${series}/history?metric=${metric}&days=${days}".to_string()
}

fn default_summaries_path() -> String {
    "/daos?page=${page}&page_size=${page_size}".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
    #[serde(default = "default_range_presets")]
    pub range_presets: Vec<u32>,
    #[serde(default)]
    pub view: ViewKind,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub sort: SortKey,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            default_range_days: default_range_days(),
            range_presets: default_range_presets(),
            view: ViewKind::default(),
            page_size: default_page_size(),
            sort: SortKey::default(),
        }
    }
}

fn default_platform() -> String {
    "twitter".to_string()
}

fn default_range_days() -> u32 {
    30
}

fn default_range_presets() -> Vec<u32> {
    vec![7, 30, 90, 180, 365]
}

fn default_page_size() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlatformConfig {
    pub id: String,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

/// One line on a platform's chart, e.g. the project account or a DAO account.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeriesConfig {
    pub id: String,
    pub label: String,
}

impl DashboardConfig {
    pub fn catalog(&self) -> MetricCatalog {
        MetricCatalog::new(
            self.platforms
                .iter()
                .map(|p| PlatformMetrics::new(p.id.clone(), p.metrics.clone()))
                .collect(),
        )
    }

    /// Series charted for `platform`; unknown platforms chart nothing.
    pub fn series_for(&self, platform: &str) -> &[SeriesConfig] {
        self.platforms
            .iter()
            .find(|p| p.id == platform)
            .map(|p| p.series.as_slice())
            .unwrap_or(&[])
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a request path
pub fn prepare_query(query: &str, vars: &HashMap<String, String>) -> String {
    let mut result = query.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [api]
        base_url = "https://analytics.example.org/api"

        [dashboard]
        platform = "discord"
        view = "normalized_from_baseline"
        sort = "by_growth_pct"

        [[platforms]]
        id = "discord"
        metrics = ["discord_member_count", "discord_message_count"]
        series = [{ id = "main-server", label = "Main server" }]

        [[platforms]]
        id = "twitter"
        metrics = ["twitter_follower_count"]
    "#;

    fn sample() -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(SAMPLE, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_prepare_query() {
        let mut vars = HashMap::new();
        vars.insert("series".to_string(), "ens".to_string());
        vars.insert("days".to_string(), "90".to_string());

        let query = "/metrics/${series}/history?days=${days}&metric=${metric}";
        let result = prepare_query(query, &vars);

        assert_eq!(result, "/metrics/ens/history?days=90&metric=${metric}");
    }

    #[test]
    fn test_load_from_toml() {
        let config = sample();

        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.api.token.is_none());
        assert_eq!(config.dashboard.platform, "discord");
        assert_eq!(config.dashboard.default_range_days, 30);
        assert_eq!(config.dashboard.range_presets, vec![7, 30, 90, 180, 365]);
        assert_eq!(config.dashboard.view, ViewKind::NormalizedFromBaseline);
        assert_eq!(config.dashboard.sort, SortKey::ByGrowthPct);
    }

    #[test]
    fn test_catalog_and_series_lookup() {
        let config = sample();
        let catalog = config.catalog();

        assert_eq!(catalog.metrics_for("discord")[1], "discord_message_count");
        assert_eq!(config.series_for("discord")[0].label, "Main server");
        assert!(config.series_for("twitter").is_empty());
        assert!(config.series_for("unknown").is_empty());
    }
}
