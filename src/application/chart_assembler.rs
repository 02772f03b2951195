// Chart assembler - collects fetch results for one selection and recomputes frames
use crate::domain::chart::ChartFrame;
use crate::domain::selection::SelectionToken;
use crate::domain::snapshot::SnapshotSeries;
use crate::domain::view::ViewKind;

#[derive(Debug, Clone)]
enum SlotState {
    Pending,
    Resolved(SnapshotSeries),
    Failed,
}

#[derive(Debug, Clone)]
struct Slot {
    series_id: String,
    state: SlotState,
}

/// Holds the series resolved so far for the current selection token.
///
/// Results carrying any other token are dropped. Every frame is recomputed
/// from scratch over the resolved subset, in configured series order.
#[derive(Debug, Clone)]
pub struct ChartAssembler {
    token: SelectionToken,
    view: ViewKind,
    slots: Vec<Slot>,
}

impl ChartAssembler {
    pub fn new<I, S>(token: SelectionToken, view: ViewKind, series_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token,
            view,
            slots: Self::pending_slots(series_ids),
        }
    }

    fn pending_slots<I, S>(series_ids: I) -> Vec<Slot>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        series_ids
            .into_iter()
            .map(|id| Slot {
                series_id: id.into(),
                state: SlotState::Pending,
            })
            .collect()
    }

    /// Start over for a new selection, dropping everything loaded for the old one.
    pub fn reset<I, S>(&mut self, token: SelectionToken, series_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tracing::debug!(generation = token.generation, "resetting chart assembler");
        self.token = token;
        self.slots = Self::pending_slots(series_ids);
    }

    pub fn token(&self) -> &SelectionToken {
        &self.token
    }

    pub fn set_view(&mut self, view: ViewKind) {
        self.view = view;
    }

    /// Record a resolved fetch. Returns `false` when the result was discarded.
    pub fn resolve(&mut self, token: &SelectionToken, series_id: &str, series: SnapshotSeries) -> bool {
        self.settle(token, series_id, SlotState::Resolved(series))
    }

    /// Record a failed fetch; the series is simply left out of the chart.
    pub fn fail(&mut self, token: &SelectionToken, series_id: &str) -> bool {
        self.settle(token, series_id, SlotState::Failed)
    }

    fn settle(&mut self, token: &SelectionToken, series_id: &str, state: SlotState) -> bool {
        if *token != self.token {
            tracing::debug!(
                series_id,
                stale_generation = token.generation,
                current_generation = self.token.generation,
                "discarding stale fetch result"
            );
            return false;
        }

        match self.slots.iter_mut().find(|slot| slot.series_id == series_id) {
            Some(slot) => {
                slot.state = state;
                true
            }
            None => {
                tracing::warn!(series_id, "fetch result for unknown series");
                false
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot.state, SlotState::Pending))
            .count()
    }

    pub fn frame(&self) -> ChartFrame {
        let resolved: Vec<SnapshotSeries> = self
            .slots
            .iter()
            .filter_map(|slot| match &slot.state {
                SlotState::Resolved(series) => Some(series.clone()),
                SlotState::Pending | SlotState::Failed => None,
            })
            .collect();

        ChartFrame::compute(self.token.clone(), self.view, &resolved, self.pending())
    }
}
