use crate::board::{Board, MountedChart};
use crate::errors::AppError;
use crate::filter::{FilterCriteria, Selection};
use crate::lifecycle::{Dashboard, Phase, LOAD_FAILED_MESSAGE};
use crate::models::{CountTable, DilemmaInsights, FilterOptions, InsightNarrative, KpiSummary, Notice};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::{header, HeaderName},
    response::{Html, IntoResponse},
    Json,
};
use serde::Serialize;

/// Carries the export outcome message to the page alongside the download.
pub const NOTICE_HEADER: &str = "x-dashboard-notice";

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub phase: Phase,
    pub kpis: Option<KpiSummary>,
    pub insights: Option<DilemmaInsights>,
    pub narrative: Option<InsightNarrative>,
    pub charts: Vec<MountedChart>,
    pub filters: FilterOptions,
    pub criteria: FilterCriteria,
    pub notice: Option<Notice>,
}

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    Ok(Json(snapshot(&mut dashboard)?))
}

pub async fn apply_filters(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    if let Some(dataset) = dashboard.dataset() {
        let ages = &dataset.demographics.age_groups;
        let professions = &dataset.demographics.professions;
        check_selection("age group", &criteria.age, ages)?;
        check_selection("profession", &criteria.profession, professions)?;
    }

    dashboard.apply_filters(criteria).await?;
    Ok(Json(snapshot(&mut dashboard)?))
}

pub async fn reset_filters(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.reset_filters().await?;
    Ok(Json(snapshot(&mut dashboard)?))
}

pub async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut dashboard = state.dashboard.lock().await;
    let outcome = dashboard.export();
    // The download response delivers the notice; don't leave it for the next snapshot.
    let notice = dashboard.surface_mut().take_notice();
    let artifact = outcome?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    let message = notice.map(|notice| notice.message).unwrap_or_default();
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (HeaderName::from_static(NOTICE_HEADER), message),
        ],
        artifact.body,
    ))
}

fn snapshot(dashboard: &mut Dashboard<Board>) -> Result<DashboardResponse, AppError> {
    if dashboard.phase() == Phase::Failed {
        let message = dashboard.surface().error().unwrap_or(LOAD_FAILED_MESSAGE);
        return Err(AppError::unavailable(message));
    }

    let filters = match dashboard.dataset() {
        Some(dataset) => FilterOptions {
            ages: dataset.demographics.age_groups.labels(),
            professions: dataset.demographics.professions.labels(),
        },
        None => FilterOptions {
            ages: Vec::new(),
            professions: Vec::new(),
        },
    };
    let phase = dashboard.phase();
    let criteria = dashboard.criteria().clone();

    let board = dashboard.surface_mut();
    Ok(DashboardResponse {
        phase,
        kpis: board.kpis().cloned(),
        insights: board.insights().cloned(),
        narrative: board.narrative().cloned(),
        charts: board.charts(),
        filters,
        criteria,
        notice: board.take_notice(),
    })
}

fn check_selection(dimension: &str, selection: &Selection, table: &CountTable) -> Result<(), AppError> {
    match selection {
        Selection::Only(label) if table.get(label).is_none() => Err(AppError::bad_request(format!(
            "unknown {dimension} '{label}'"
        ))),
        _ => Ok(()),
    }
}
