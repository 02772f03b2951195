// Platform catalog - the fixed per-platform metric lookup table

/// Metrics offered for one platform, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformMetrics {
    pub id: String,
    pub metrics: Vec<String>,
}

impl PlatformMetrics {
    pub fn new(id: impl Into<String>, metrics: Vec<String>) -> Self {
        Self {
            id: id.into(),
            metrics,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricCatalog {
    platforms: Vec<PlatformMetrics>,
}

impl MetricCatalog {
    pub fn new(platforms: Vec<PlatformMetrics>) -> Self {
        Self { platforms }
    }

    /// Metrics for `platform`; unknown platforms offer nothing.
    pub fn metrics_for(&self, platform: &str) -> &[String] {
        self.platforms
            .iter()
            .find(|p| p.id == platform)
            .map(|p| p.metrics.as_slice())
            .unwrap_or(&[])
    }

    pub fn offers(&self, platform: &str, metric: &str) -> bool {
        self.metrics_for(platform).iter().any(|m| m == metric)
    }

    pub fn platform_ids(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.id.as_str())
    }
}

/// Human readable name for a platform or metric id.
pub fn display_name(id: &str) -> String {
    // "dao_twitter" -> "Dao Twitter"
    id.trim_matches('_')
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) fn sample_catalog() -> MetricCatalog {
    let metrics = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
    MetricCatalog::new(vec![
        PlatformMetrics::new(
            "discord",
            metrics(&["discord_member_count", "discord_message_count"]),
        ),
        PlatformMetrics::new(
            "twitter",
            metrics(&["twitter_follower_count", "twitter_engagement", "twitter_tweet_count"]),
        ),
        PlatformMetrics::new("github", Vec::new()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("dao_twitter"), "Dao Twitter");
        assert_eq!(display_name("discord_member_count_"), "Discord Member Count");
        assert_eq!(display_name("telegram"), "Telegram");
    }

    #[test]
    fn test_metrics_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.metrics_for("twitter")[0], "twitter_follower_count");
        assert!(catalog.metrics_for("myspace").is_empty());
        assert!(catalog.offers("discord", "discord_message_count"));
        assert!(!catalog.offers("discord", "twitter_engagement"));
        assert_eq!(
            catalog.platform_ids().collect::<Vec<_>>(),
            vec!["discord", "twitter", "github"]
        );
    }
}
