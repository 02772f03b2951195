// Mapper to convert chart frames and leaderboard pages to the renderer's JSON payload
use crate::application::ranking::Page;
use crate::domain::aligned::{AlignedSeries, DateAxis};
use crate::domain::chart::ChartFrame;
use crate::domain::dao::EntitySummary;
use crate::domain::tile::GrowthTile;
use crate::domain::view::ViewKind;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChartPayload {
    pub title: String,
    pub platform: String,
    pub metric: Option<String>,
    pub range_days: u32,
    pub generation: u64,
    pub view: ViewKind,
    pub complete: bool,
    pub pending: usize,
    pub dates: DateAxis,
    pub series: Vec<AlignedSeries>,
    pub tiles: Vec<GrowthTile>,
}

pub fn chart_to_payload(frame: ChartFrame) -> ChartPayload {
    let complete = frame.is_complete();

    ChartPayload {
        title: frame.title,
        platform: frame.token.platform,
        metric: frame.token.metric,
        range_days: frame.token.range_days,
        generation: frame.token.generation,
        view: frame.view,
        complete,
        pending: frame.pending,
        dates: frame.axis,
        series: frame.series,
        tiles: frame.tiles,
    }
}

pub fn chart_to_json(frame: ChartFrame) -> anyhow::Result<String> {
    Ok(serde_json::to_string(&chart_to_payload(frame))?)
}

pub fn leaderboard_to_json(page: &Page<EntitySummary>) -> anyhow::Result<String> {
    Ok(serde_json::to_string(page)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::SelectionToken;
    use crate::domain::snapshot::{SnapshotPoint, SnapshotSeries};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    #[test]
    fn test_chart_payload_shape() {
        let day = |d| Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap();
        let token = SelectionToken {
            platform: "telegram".to_string(),
            metric: Some("telegram_member_count".to_string()),
            range_days: 7,
            generation: 4,
        };
        let resolved = vec![
            SnapshotSeries::new("group", vec![SnapshotPoint::new(day(1), 40.0)]),
            SnapshotSeries::new("channel", vec![SnapshotPoint::new(day(2), 8.0)]),
        ];
        let frame = ChartFrame::compute(token, ViewKind::Absolute, &resolved, 0);

        let value: Value = serde_json::from_str(&chart_to_json(frame).unwrap()).unwrap();

        assert_eq!(value["title"], "Telegram Member Count (last 7d)");
        assert_eq!(value["view"], "absolute");
        assert_eq!(value["complete"], true);
        assert_eq!(
            value["dates"],
            json!(["2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z"])
        );
        assert_eq!(value["series"][0]["values"], json!([40.0, null]));
        assert_eq!(value["series"][1]["values"], json!([null, 8.0]));
        assert_eq!(value["tiles"][1]["latest"], json!(8.0));
        assert_eq!(value["tiles"][1]["change_pct"], Value::Null);
    }

    #[test]
    fn test_leaderboard_payload_shape() {
        let page = Page::from_server(vec![EntitySummary::new("ens", 10.0, 1.0, 2.0)], 1, 10, 11);

        let value: Value = serde_json::from_str(&leaderboard_to_json(&page).unwrap()).unwrap();

        assert_eq!(value["total_pages"], 2);
        assert_eq!(value["has_more"], true);
        assert_eq!(value["items"][0]["id"], "ens");
    }
}
