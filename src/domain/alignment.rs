// Date axis construction and series alignment
use super::aligned::{AlignedSeries, DateAxis, SampleValue};
use super::snapshot::SnapshotSeries;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

/// Sorted union of every timestamp appearing in any of the given series.
pub fn build_axis<'a, I>(series: I) -> DateAxis
where
    I: IntoIterator<Item = &'a SnapshotSeries>,
{
    let dates: BTreeSet<DateTime<Utc>> = series
        .into_iter()
        .flat_map(|s| s.points().iter().map(|p| p.timestamp))
        .collect();

    DateAxis::from_sorted(dates.into_iter().collect())
}

/// Resample `series` onto `axis` by exact timestamp match.
///
/// Axis entries with no matching point become `Absent`; gaps are never
/// interpolated or carried forward.
pub fn align(series: &SnapshotSeries, axis: &DateAxis) -> AlignedSeries {
    let by_time: HashMap<DateTime<Utc>, f64> = series
        .points()
        .iter()
        .map(|p| (p.timestamp, p.value))
        .collect();

    let values = axis
        .dates()
        .iter()
        .map(|date| SampleValue::from(by_time.get(date).copied()))
        .collect();

    AlignedSeries::new(series.label.clone(), values)
}

/// Build the shared axis and align every series onto it, preserving input order.
pub fn align_all(series: &[SnapshotSeries]) -> (DateAxis, Vec<AlignedSeries>) {
    let axis = build_axis(series);
    let aligned = series.iter().map(|s| align(s, &axis)).collect();
    (axis, aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::SnapshotPoint;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn series(label: &str, points: &[(u32, f64)]) -> SnapshotSeries {
        SnapshotSeries::new(
            label,
            points
                .iter()
                .map(|(d, v)| SnapshotPoint::new(day(*d), *v))
                .collect(),
        )
    }

    #[test]
    fn test_axis_is_sorted_union() {
        let discord = series("discord", &[(1, 10.0), (3, 12.0), (5, 15.0)]);
        let twitter = series("twitter", &[(2, 100.0), (3, 101.0)]);

        let axis = build_axis([&discord, &twitter]);

        assert_eq!(axis.dates(), &[day(1), day(2), day(3), day(5)]);
    }

    #[test]
    fn test_axis_of_empty_inputs_is_empty() {
        let empty = series("discord", &[]);
        assert!(build_axis([&empty]).is_empty());
        assert!(build_axis(std::iter::empty::<&SnapshotSeries>()).is_empty());
    }

    #[test]
    fn test_align_leaves_gaps_absent() {
        let discord = series("discord", &[(1, 10.0), (3, 0.0)]);
        let twitter = series("twitter", &[(2, 100.0), (4, 105.0)]);
        let axis = build_axis([&discord, &twitter]);

        let aligned = align(&discord, &axis);

        assert_eq!(aligned.label, "discord");
        assert_eq!(
            aligned.values,
            vec![
                SampleValue::Present(10.0),
                SampleValue::Absent,
                SampleValue::Present(0.0),
                SampleValue::Absent,
            ]
        );
    }

    #[test]
    fn test_align_all_keeps_input_order() {
        let a = series("b-late", &[(4, 1.0)]);
        let b = series("a-early", &[(1, 2.0)]);

        let (axis, aligned) = align_all(&[a, b]);

        assert_eq!(axis.len(), 2);
        assert_eq!(aligned[0].label, "b-late");
        assert_eq!(aligned[1].label, "a-early");
        assert!(aligned.iter().all(|s| s.len() == axis.len()));
    }
}
