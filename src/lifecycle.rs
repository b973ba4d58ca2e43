use crate::charts::{build_charts, ChartConfig, ChartSettings, ChartSlot};
use crate::errors::{ExportError, LifecycleError, LoadError};
use crate::export::{self, ExportArtifact};
use crate::filter::{self, FilterCriteria};
use crate::models::{Dataset, DilemmaInsights, KpiSummary, Notice};
use crate::stats::build_kpis;
use rand::Rng;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data. Please try again later.";
pub const FILTERS_APPLIED: &str = "Filters applied!";
pub const EXPORT_DONE: &str = "Data exported successfully!";

/// `Idle -> Loading -> Loaded -> Rendered -> (Filtering -> Rendered)*`.
/// `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Rendered,
    Filtering,
    Failed,
}

/// Where the dataset comes from.
pub trait DatasetSource {
    fn fetch(&self) -> impl Future<Output = Result<Dataset, LoadError>> + Send;
}

/// Chart mount points.
pub trait ChartSurface {
    fn destroy(&mut self, slot: ChartSlot);
    fn bind(&mut self, slot: ChartSlot, config: ChartConfig);
}

/// KPI cards, insight panels, notifications and the loading screen.
pub trait ViewSurface {
    fn show_kpis(&mut self, kpis: &KpiSummary);
    fn show_insights(&mut self, insights: &DilemmaInsights);
    fn notify(&mut self, notice: Notice);
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pause between a successful load and the first render.
    pub intro: Duration,
    /// Pause before charts are rebuilt on every render.
    pub chart_refresh: Duration,
}

impl Timings {
    pub fn immediate() -> Self {
        Self {
            intro: Duration::ZERO,
            chart_refresh: Duration::ZERO,
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            intro: Duration::from_millis(1500),
            chart_refresh: Duration::from_millis(1000),
        }
    }
}

pub struct Dashboard<S> {
    phase: Phase,
    dataset: Option<Dataset>,
    view: Option<Dataset>,
    criteria: FilterCriteria,
    bound: Vec<ChartSlot>,
    surface: S,
    timings: Timings,
    chart_settings: ChartSettings,
}

impl<S> Dashboard<S>
where
    S: ChartSurface + ViewSurface,
{
    pub fn new(surface: S, timings: Timings) -> Self {
        Self {
            phase: Phase::Idle,
            dataset: None,
            view: None,
            criteria: FilterCriteria::default(),
            bound: Vec::new(),
            surface,
            timings,
            chart_settings: ChartSettings::default(),
        }
    }

    pub fn with_chart_settings(mut self, settings: ChartSettings) -> Self {
        self.chart_settings = settings;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn view(&self) -> Option<&Dataset> {
        self.view.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Loads the dataset and renders the first cycle. A load failure leaves
    /// the dashboard in `Failed` for good.
    pub async fn start<D: DatasetSource>(&mut self, source: &D) -> Result<(), LoadError> {
        if self.phase != Phase::Idle {
            return Ok(());
        }

        self.phase = Phase::Loading;
        let dataset = match source.fetch().await {
            Ok(dataset) => dataset,
            Err(err) => {
                error!("failed to load travel data: {err}");
                self.phase = Phase::Failed;
                self.surface.show_error(LOAD_FAILED_MESSAGE);
                return Err(err);
            }
        };

        info!(
            respondents = crate::stats::total(&dataset.demographics.age_groups),
            "dataset loaded"
        );
        self.view = Some(dataset.clone());
        self.dataset = Some(dataset);
        self.phase = Phase::Loaded;

        pause(self.timings.intro).await;
        self.render().await;
        Ok(())
    }

    pub async fn apply_filters(&mut self, criteria: FilterCriteria) -> Result<(), LifecycleError> {
        let view = filter::apply_filter(self.rendered_dataset()?, &criteria);
        self.rerender(criteria, view).await;
        Ok(())
    }

    pub async fn apply_filters_with<R: Rng>(
        &mut self,
        criteria: FilterCriteria,
        rng: &mut R,
    ) -> Result<(), LifecycleError> {
        let view = filter::apply_filter_with(self.rendered_dataset()?, &criteria, rng);
        self.rerender(criteria, view).await;
        Ok(())
    }

    pub async fn reset_filters(&mut self) -> Result<(), LifecycleError> {
        self.apply_filters(FilterCriteria::default()).await
    }

    /// Exports the current view and posts a notification either way.
    pub fn export(&mut self) -> Result<ExportArtifact, ExportError> {
        let outcome = self
            .view
            .as_ref()
            .ok_or(ExportError::NoData)
            .and_then(export::export);

        match &outcome {
            Ok(artifact) => {
                info!(file = %artifact.file_name, "export ready");
                self.surface.notify(Notice::info(EXPORT_DONE));
            }
            Err(err) => {
                error!("export failed: {err}");
                self.surface.notify(Notice::error(format!("Export failed: {err}")));
            }
        }
        outcome
    }

    fn rendered_dataset(&self) -> Result<&Dataset, LifecycleError> {
        match (self.phase, self.dataset.as_ref()) {
            (Phase::Rendered, Some(dataset)) => Ok(dataset),
            (phase, _) => Err(LifecycleError::NotReady(phase)),
        }
    }

    async fn rerender(&mut self, criteria: FilterCriteria, view: Dataset) {
        self.phase = Phase::Filtering;
        info!(?criteria, "applying filters");
        self.criteria = criteria;
        self.view = Some(view);
        self.surface.notify(Notice::info(FILTERS_APPLIED));
        self.render().await;
    }

    async fn render(&mut self) {
        let Some(view) = self.view.as_ref() else {
            return;
        };

        let kpis = build_kpis(view);
        self.surface.show_kpis(&kpis);
        if let Some(insights) = &kpis.insights {
            self.surface.show_insights(insights);
        }

        let charts = build_charts(view, &self.chart_settings);
        for slot in self.bound.drain(..) {
            self.surface.destroy(slot);
        }

        pause(self.timings.chart_refresh).await;
        for (slot, config) in charts {
            self.surface.bind(slot, config);
            self.bound.push(slot);
        }
        self.phase = Phase::Rendered;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
