// Summary tiles shown above a chart
use super::aligned::{AlignedSeries, SampleValue};
use super::view::percent_change;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthTile {
    pub label: String,
    pub latest: SampleValue,
    pub earliest: SampleValue,
    /// Change between the first and last present values over the axis.
    pub change_pct: SampleValue,
}

impl GrowthTile {
    pub fn from_aligned(series: &AlignedSeries) -> Self {
        let present: Vec<f64> = series.values.iter().filter_map(|v| v.present()).collect();

        let change_pct = match present.as_slice() {
            [first, .., last] => percent_change(*first, *last),
            _ => SampleValue::Absent,
        };

        Self {
            label: series.label.clone(),
            latest: present.last().copied().into(),
            earliest: present.first().copied().into(),
            change_pct,
        }
    }
}
