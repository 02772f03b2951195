// Snapshot domain models - raw measurements as delivered by the fetch layer
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnapshotPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl SnapshotPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// One platform/metric history. Points are ascending with unique timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSeries {
    pub label: String,
    points: Vec<SnapshotPoint>,
}

impl SnapshotSeries {
    /// Builds a series from points already known to be ascending and unique.
    pub fn new(label: impl Into<String>, points: Vec<SnapshotPoint>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "snapshot points must be strictly ascending"
        );
        Self {
            label: label.into(),
            points,
        }
    }

    /// Builds a series from raw fetch output.
    ///
    /// Non-finite values are dropped, points are sorted ascending and a
    /// repeated timestamp keeps the value that arrived last.
    pub fn from_unordered(label: impl Into<String>, mut points: Vec<SnapshotPoint>) -> Self {
        points.retain(|p| p.value.is_finite());
        // stable, so "last" below means last in arrival order
        points.sort_by_key(|p| p.timestamp);

        let mut canonical: Vec<SnapshotPoint> = Vec::with_capacity(points.len());
        for point in points {
            match canonical.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => canonical.push(point),
            }
        }

        Self::new(label, canonical)
    }

    pub fn points(&self) -> &[SnapshotPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
