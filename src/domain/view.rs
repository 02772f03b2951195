// View transforms applied to aligned series before charting
use super::aligned::{AlignedSeries, SampleValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Absolute,
    NormalizedFromBaseline,
    PeriodOverPeriodGrowth,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [
        ViewKind::Absolute,
        ViewKind::NormalizedFromBaseline,
        ViewKind::PeriodOverPeriodGrowth,
    ];
}

/// Apply `kind` to `aligned`. Output has the same length and label; the input
/// is never modified.
pub fn transform(aligned: &AlignedSeries, kind: ViewKind) -> AlignedSeries {
    let values = match kind {
        ViewKind::Absolute => aligned.values.clone(),
        ViewKind::NormalizedFromBaseline => normalized_from_baseline(&aligned.values),
        ViewKind::PeriodOverPeriodGrowth => period_over_period_growth(&aligned.values),
    };

    AlignedSeries::new(aligned.label.clone(), values)
}

fn normalized_from_baseline(values: &[SampleValue]) -> Vec<SampleValue> {
    let baseline = values.iter().find_map(|v| v.present());

    values
        .iter()
        .map(|v| match (baseline, v.present()) {
            (Some(b), Some(current)) => percent_change(b, current),
            _ => SampleValue::Absent,
        })
        .collect()
}

fn period_over_period_growth(values: &[SampleValue]) -> Vec<SampleValue> {
    let mut growth = Vec::with_capacity(values.len());
    if values.is_empty() {
        return growth;
    }

    // Nothing precedes the first axis point.
    growth.push(SampleValue::Absent);
    growth.extend(values.windows(2).map(|pair| match (pair[0].present(), pair[1].present()) {
        (Some(previous), Some(current)) => percent_change(previous, current),
        _ => SampleValue::Absent,
    }));

    growth
}

/// `(to - from) / from * 100`, or `Absent` when `from` is zero.
pub(crate) fn percent_change(from: f64, to: f64) -> SampleValue {
    if from == 0.0 {
        return SampleValue::Absent;
    }

    let pct = (to - from) / from * 100.0;
    if pct.is_finite() {
        return SampleValue::Present(pct);
    }

    debug_assert!(
        !(from.is_finite() && to.is_finite()),
        "percent change of finite inputs {from} -> {to} produced {pct}"
    );
    tracing::warn!(from, to, "non-finite percent change, treating as absent");
    SampleValue::Absent
}
