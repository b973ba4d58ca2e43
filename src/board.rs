use crate::charts::{ChartConfig, ChartSlot};
use crate::lifecycle::{ChartSurface, ViewSurface};
use crate::models::{DilemmaInsights, InsightNarrative, KpiSummary, Notice};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Server-side mount points and text elements that the page mirrors.
#[derive(Debug, Default)]
pub struct Board {
    charts: BTreeMap<ChartSlot, ChartConfig>,
    kpis: Option<KpiSummary>,
    insights: Option<DilemmaInsights>,
    narrative: Option<InsightNarrative>,
    notice: Option<Notice>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MountedChart {
    pub id: ChartSlot,
    pub config: ChartConfig,
}

impl Board {
    pub fn kpis(&self) -> Option<&KpiSummary> {
        self.kpis.as_ref()
    }

    pub fn insights(&self) -> Option<&DilemmaInsights> {
        self.insights.as_ref()
    }

    pub fn narrative(&self) -> Option<&InsightNarrative> {
        self.narrative.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mounted charts in render order.
    pub fn charts(&self) -> Vec<MountedChart> {
        self.charts
            .iter()
            .map(|(slot, config)| MountedChart {
                id: *slot,
                config: config.clone(),
            })
            .collect()
    }

    /// Hands out the pending notification once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

impl ChartSurface for Board {
    fn destroy(&mut self, slot: ChartSlot) {
        self.charts.remove(&slot);
    }

    fn bind(&mut self, slot: ChartSlot, config: ChartConfig) {
        debug!(chart = slot.id(), "chart bound");
        if self.charts.insert(slot, config).is_some() {
            warn!(chart = slot.id(), "chart rebound without destroy");
        }
    }
}

impl ViewSurface for Board {
    fn show_kpis(&mut self, kpis: &KpiSummary) {
        self.kpis = Some(kpis.clone());
        if kpis.insights.is_none() {
            self.insights = None;
            self.narrative = None;
        }
    }

    fn show_insights(&mut self, insights: &DilemmaInsights) {
        self.narrative = Some(insights.narrative());
        self.insights = Some(insights.clone());
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_chart, ChartSettings};
    use crate::models::Dataset;

    #[test]
    fn charts_come_back_in_render_order() {
        let mut board = Board::default();
        let view = Dataset::default();
        for slot in [ChartSlot::Overspending, ChartSlot::Paradox, ChartSlot::Age] {
            board.bind(slot, build_chart(slot, &view, &ChartSettings::default()));
        }
        board.destroy(ChartSlot::Age);

        let ids: Vec<ChartSlot> = board.charts().iter().map(|chart| chart.id).collect();
        assert_eq!(ids, vec![ChartSlot::Paradox, ChartSlot::Overspending]);
    }

    #[test]
    fn notice_is_taken_once() {
        let mut board = Board::default();
        board.notify(Notice::info("Filters applied!"));
        assert!(board.take_notice().is_some());
        assert!(board.take_notice().is_none());
    }
}
