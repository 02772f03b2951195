// Metric selection state machine driven by navigation events
use super::platform::MetricCatalog;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    PlatformChanged(String),
    InitialMount,
    MetricChosen(String),
    RangeChosen(u32),
}

/// Identifies the selection a fetch was issued for. A fetch result whose
/// token no longer matches the controller's is stale and must be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionToken {
    pub platform: String,
    pub metric: Option<String>,
    pub range_days: u32,
    pub generation: u64,
}

/// Side effects requested from the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSignal {
    /// Data loaded for this platform is no longer wanted.
    InvalidateCache { platform: String },
    Reload(SelectionToken),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("metric {metric} is not offered for platform {platform}")]
    UnknownMetric { platform: String, metric: String },

    #[error("time range must be at least one day")]
    EmptyRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub active_platform: String,
    pub selected_metric: Option<String>,
    pub time_range_days: u32,
}

#[derive(Debug, Clone)]
pub struct MetricSelectionController {
    catalog: MetricCatalog,
    state: SelectionState,
    generation: u64,
}

impl MetricSelectionController {
    pub fn new(catalog: MetricCatalog, platform: impl Into<String>, default_range_days: u32) -> Self {
        Self {
            catalog,
            state: SelectionState {
                active_platform: platform.into(),
                selected_metric: None,
                time_range_days: default_range_days,
            },
            generation: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn available_metrics(&self) -> &[String] {
        self.catalog.metrics_for(&self.state.active_platform)
    }

    pub fn token(&self) -> SelectionToken {
        SelectionToken {
            platform: self.state.active_platform.clone(),
            metric: self.state.selected_metric.clone(),
            range_days: self.state.time_range_days,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: &SelectionToken) -> bool {
        *token == self.token()
    }

    /// Apply one navigation event and return the signals it produced.
    ///
    /// A rejected event leaves the state untouched.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<Vec<SelectionSignal>, SelectionError> {
        let mut signals = Vec::new();

        let changed = match event {
            SelectionEvent::PlatformChanged(platform) => {
                if platform == self.state.active_platform {
                    false
                } else {
                    let previous = std::mem::replace(&mut self.state.active_platform, platform);
                    signals.push(SelectionSignal::InvalidateCache { platform: previous });
                    self.state.selected_metric = self.available_metrics().first().cloned();
                    true
                }
            }
            SelectionEvent::InitialMount => {
                if self.state.selected_metric.is_none() {
                    self.state.selected_metric = self.available_metrics().first().cloned();
                    self.state.selected_metric.is_some()
                } else {
                    false
                }
            }
            SelectionEvent::MetricChosen(metric) => {
                if !self.catalog.offers(&self.state.active_platform, &metric) {
                    tracing::warn!(
                        platform = %self.state.active_platform,
                        metric = %metric,
                        "rejecting metric not offered by platform"
                    );
                    return Err(SelectionError::UnknownMetric {
                        platform: self.state.active_platform.clone(),
                        metric,
                    });
                }
                let changed = self.state.selected_metric.as_deref() != Some(metric.as_str());
                self.state.selected_metric = Some(metric);
                changed
            }
            SelectionEvent::RangeChosen(days) => {
                if days == 0 {
                    return Err(SelectionError::EmptyRange);
                }
                let changed = self.state.time_range_days != days;
                self.state.time_range_days = days;
                changed
            }
        };

        if changed {
            self.generation += 1;
            let token = self.token();
            tracing::debug!(
                platform = %token.platform,
                metric = ?token.metric,
                range_days = token.range_days,
                generation = token.generation,
                "selection changed, requesting reload"
            );
            signals.push(SelectionSignal::Reload(token));
        }

        Ok(signals)
    }
}
