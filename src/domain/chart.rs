// Chart frame domain model - one render's worth of chart-ready data
use super::aligned::{AlignedSeries, DateAxis};
use super::alignment::align_all;
use super::platform::display_name;
use super::selection::SelectionToken;
use super::snapshot::SnapshotSeries;
use super::tile::GrowthTile;
use super::view::{transform, ViewKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    pub token: SelectionToken,
    pub view: ViewKind,
    pub axis: DateAxis,
    pub series: Vec<AlignedSeries>,
    /// Tiles always describe absolute values, whatever the view.
    pub tiles: Vec<GrowthTile>,
    /// Series still waiting on their fetch.
    pub pending: usize,
}

impl ChartFrame {
    /// Recompute the whole frame from the series resolved so far.
    pub fn compute(
        token: SelectionToken,
        view: ViewKind,
        resolved: &[SnapshotSeries],
        pending: usize,
    ) -> Self {
        let (axis, aligned) = align_all(resolved);
        let tiles = aligned.iter().map(GrowthTile::from_aligned).collect();
        let series = aligned.iter().map(|s| transform(s, view)).collect();

        Self {
            title: chart_title(&token),
            token,
            view,
            axis,
            series,
            tiles,
            pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}

fn chart_title(token: &SelectionToken) -> String {
    match &token.metric {
        Some(metric) => format!("{} (last {}d)", display_name(metric), token.range_days),
        None => format!("{} (no metrics)", display_name(&token.platform)),
    }
}
