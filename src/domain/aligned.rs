// Aligned series domain models - values resampled onto a shared date axis
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A value on the shared axis. `Absent` is never the same thing as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum SampleValue {
    Present(f64),
    Absent,
}

impl SampleValue {
    pub fn present(self) -> Option<f64> {
        match self {
            SampleValue::Present(v) => Some(v),
            SampleValue::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, SampleValue::Absent)
    }
}

impl From<Option<f64>> for SampleValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(SampleValue::Absent, SampleValue::Present)
    }
}

impl From<SampleValue> for Option<f64> {
    fn from(value: SampleValue) -> Self {
        value.present()
    }
}

/// Strictly ascending, deduplicated timestamps shared by every aligned series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DateAxis(Vec<DateTime<Utc>>);

impl DateAxis {
    pub(crate) fn from_sorted(dates: Vec<DateTime<Utc>>) -> Self {
        debug_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        Self(dates)
    }

    pub fn dates(&self) -> &[DateTime<Utc>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeries {
    pub label: String,
    pub values: Vec<SampleValue>,
}

impl AlignedSeries {
    pub fn new(label: impl Into<String>, values: Vec<SampleValue>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    /// Build from optionals, `None` becoming `Absent`.
    pub fn from_options(label: impl Into<String>, values: &[Option<f64>]) -> Self {
        Self::new(label, values.iter().copied().map(SampleValue::from).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First present value, skipping leading gaps.
    pub fn first_present(&self) -> Option<f64> {
        self.values.iter().find_map(|v| v.present())
    }

    /// Last present value, skipping trailing gaps.
    pub fn last_present(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| v.present())
    }
}
