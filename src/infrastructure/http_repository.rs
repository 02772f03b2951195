// HTTP repository implementation against the analytics API
use crate::application::metrics_repository::{MetricsRepository, SummaryPage};
use crate::domain::dao::EntitySummary;
use crate::domain::snapshot::{SnapshotPoint, SnapshotSeries};
use crate::infrastructure::config::{prepare_query, ApiSettings};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpMetricsRepository {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    history_path: String,
    summaries_path: String,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    points: Vec<HistoryPoint>,
}

#[derive(Debug, Deserialize)]
struct HistoryPoint {
    timestamp: String,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SummariesResponse {
    #[serde(default)]
    items: Vec<EntitySummary>,
    #[serde(default)]
    total: Option<usize>,
}

impl HttpMetricsRepository {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            history_path: settings.history_path.clone(),
            summaries_path: settings.summaries_path.clone(),
        })
    }

    fn build_url(&self, template: &str, vars: &[(&str, String)]) -> String {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), urlencoding::encode(v).into_owned()))
            .collect();
        format!("{}{}", self.base_url, prepare_query(template, &vars))
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

/// Decode a history body. Points with a null value or an unparsable
/// timestamp are skipped; the rest are canonicalized.
fn parse_history(url: &str, fallback_label: &str, body: &str) -> Result<SnapshotSeries, FetchError> {
    let response: HistoryResponse = serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })?;

    let mut skipped = 0usize;
    let points: Vec<SnapshotPoint> = response
        .points
        .into_iter()
        .filter_map(|p| {
            let parsed = chrono::DateTime::parse_from_rfc3339(&p.timestamp)
                .ok()
                .zip(p.value)
                .map(|(time, value)| SnapshotPoint::new(time.with_timezone(&chrono::Utc), value));
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(url, skipped, "skipped unusable history points");
    }

    let label = response.label.unwrap_or_else(|| fallback_label.to_string());
    Ok(SnapshotSeries::from_unordered(label, points))
}

fn parse_summaries(url: &str, body: &str) -> Result<SummaryPage, FetchError> {
    let response: SummariesResponse = serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })?;

    // Older deployments omit the total; fall back to what we were given.
    let total = response.total.unwrap_or(response.items.len());
    Ok(SummaryPage {
        items: response.items,
        total,
    })
}

#[async_trait]
impl MetricsRepository for HttpMetricsRepository {
    async fn fetch_history(&self, series_id: &str, metric: &str, range_days: u32) -> Result<SnapshotSeries> {
        let url = self.build_url(
            &self.history_path,
            &[
                ("series", series_id.to_string()),
                ("metric", metric.to_string()),
                ("days", range_days.to_string()),
            ],
        );

        tracing::debug!(%url, "fetching history");
        let body = self.get_body(&url).await?;
        let series = parse_history(&url, series_id, &body)?;
        tracing::debug!(series_id, points = series.len(), "history fetched");

        Ok(series)
    }

    async fn fetch_entity_summaries(&self, page: usize, page_size: usize) -> Result<SummaryPage> {
        let url = self.build_url(
            &self.summaries_path,
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        );

        tracing::debug!(%url, "fetching DAO summaries");
        let body = self.get_body(&url).await?;
        Ok(parse_summaries(&url, &body)?)
    }
}
