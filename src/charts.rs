use crate::models::{
    CountTable, Dataset, CULTURE_BARRIER, DISCOVERY_DIFFICULTY, LOCAL_CULTURE, SCAMS, SELF_GUIDED,
};
use crate::stats::{percent, top_n};
use serde::Serialize;
use tracing::warn;

pub mod palette {
    pub const CYAN: &str = "#39c5f7";
    pub const MAGENTA: &str = "#e577ff";
    pub const GREEN: &str = "#56d364";
    pub const RED: &str = "#ff7b72";
    pub const YELLOW: &str = "#e3b341";
    pub const ORANGE: &str = "#f08a5d";
    pub const PURPLE: &str = "#a77dff";
    pub const BLUE: &str = "#5b9dff";
    pub const MINT: &str = "#88d8b0";
    pub const TEXT: &str = "#f0f6fc";
    pub const GRID: &str = "rgba(139, 148, 158, 0.2)";
    pub const TOOLTIP_BACKGROUND: &str = "rgba(13, 17, 23, 0.9)";
    pub const PANEL: &str = "#161b22";

    pub const SERIES: [&str; 6] = [CYAN, YELLOW, MAGENTA, GREEN, ORANGE, PURPLE];

    /// Lighter variant used on hover.
    pub fn hover(color: &str) -> String {
        format!("{color}CC")
    }
}

pub const ANIMATION_MS: u32 = 1500;
const SHARE_PRECISION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartSlot {
    #[serde(rename = "paradoxChart")]
    Paradox,
    #[serde(rename = "authenticityGapChart")]
    AuthenticityGap,
    #[serde(rename = "ageChart")]
    Age,
    #[serde(rename = "professionChart")]
    Profession,
    #[serde(rename = "frequencyChart")]
    Frequency,
    #[serde(rename = "budgetChart")]
    Budget,
    #[serde(rename = "companionsChart")]
    Companions,
    #[serde(rename = "explorationChart")]
    Exploration,
    #[serde(rename = "experiencesChart")]
    Experiences,
    #[serde(rename = "problemsChart")]
    Problems,
    #[serde(rename = "satisfactionChart")]
    Satisfaction,
    #[serde(rename = "frustrationChart")]
    Frustration,
    #[serde(rename = "missingChart")]
    MissingExperiences,
    #[serde(rename = "overspendingChart")]
    Overspending,
}

impl ChartSlot {
    /// Render order.
    pub const ALL: [ChartSlot; 14] = [
        ChartSlot::Paradox,
        ChartSlot::AuthenticityGap,
        ChartSlot::Age,
        ChartSlot::Profession,
        ChartSlot::Frequency,
        ChartSlot::Budget,
        ChartSlot::Companions,
        ChartSlot::Exploration,
        ChartSlot::Experiences,
        ChartSlot::Problems,
        ChartSlot::Satisfaction,
        ChartSlot::Frustration,
        ChartSlot::MissingExperiences,
        ChartSlot::Overspending,
    ];

    /// Mount point id on the page.
    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::Paradox => "paradoxChart",
            ChartSlot::AuthenticityGap => "authenticityGapChart",
            ChartSlot::Age => "ageChart",
            ChartSlot::Profession => "professionChart",
            ChartSlot::Frequency => "frequencyChart",
            ChartSlot::Budget => "budgetChart",
            ChartSlot::Companions => "companionsChart",
            ChartSlot::Exploration => "explorationChart",
            ChartSlot::Experiences => "experiencesChart",
            ChartSlot::Problems => "problemsChart",
            ChartSlot::Satisfaction => "satisfactionChart",
            ChartSlot::Frustration => "frustrationChart",
            ChartSlot::MissingExperiences => "missingChart",
            ChartSlot::Overspending => "overspendingChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Category,
    HorizontalCategory,
    Proportion,
    StackedComparison,
}

impl ChartKind {
    pub fn chart_type(self) -> &'static str {
        match self {
            ChartKind::Proportion => "doughnut",
            _ => "bar",
        }
    }

    fn is_horizontal(self) -> bool {
        matches!(
            self,
            ChartKind::HorizontalCategory | ChartKind::StackedComparison
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TooltipFormat {
    /// `label: value (share%)`
    ShareOfTotal,
    /// `dataset: value`
    DatasetValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Line(String),
    Lines(Vec<String>),
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Line(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(String),
    PerItem(Vec<String>),
}

impl Paint {
    pub fn solid(color: &str) -> Self {
        Paint::Solid(color.to_string())
    }

    pub fn per_item(colors: &[&str]) -> Self {
        Paint::PerItem(colors.iter().map(|color| color.to_string()).collect())
    }

    fn hovered(&self) -> Self {
        match self {
            Paint::Solid(color) => Paint::Solid(palette::hover(color)),
            Paint::PerItem(colors) => {
                Paint::PerItem(colors.iter().map(|color| palette::hover(color)).collect())
            }
        }
    }
}

/// Labels and values for one chart, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<Label>,
    pub values: Vec<u64>,
    pub top_n: Option<usize>,
}

impl ChartSeries {
    pub fn from_table(table: &CountTable) -> Self {
        Self {
            labels: table.iter().map(|(label, _)| Label::from(label)).collect(),
            values: table.values(),
            top_n: None,
        }
    }

    /// Largest `n` entries, highest first.
    pub fn top(table: &CountTable, n: usize) -> Self {
        let ranked = top_n(table, n);
        Self {
            labels: ranked.iter().map(|(label, _)| Label::from(label.as_str())).collect(),
            values: ranked.into_iter().map(|(_, value)| value).collect(),
            top_n: Some(n),
        }
    }

    /// Fixed labels with values read by position; short tables are padded with 0.
    pub fn ordinal(table: &CountTable, labels: &[&str]) -> Self {
        let mut values = table.values();
        if values.len() != labels.len() {
            warn!(
                expected = labels.len(),
                found = values.len(),
                "ordinal table does not match its scale"
            );
        }
        values.resize(labels.len(), 0);
        Self {
            labels: labels.iter().map(|label| Label::from(*label)).collect(),
            values,
            top_n: None,
        }
    }

    pub fn wrapped(mut self, width: usize) -> Self {
        self.labels = self
            .labels
            .into_iter()
            .map(|label| match label {
                Label::Line(text) => wrap_label(&text, width),
                lines => lines,
            })
            .collect();
        self
    }
}

/// Splits `text` on spaces into lines of at most `width` characters.
/// A single word longer than `width` stays whole on its own line.
pub fn wrap_label(text: &str, width: usize) -> Label {
    if text.chars().count() <= width {
        return Label::Line(text.to_string());
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if candidate <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Label::Lines(lines)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_thickness: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Per-item percentage of the dataset total, for share tooltips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<Vec<f64>>,
}

impl ChartDataset {
    pub fn new(data: Vec<u64>, background_color: Paint) -> Self {
        Self {
            label: None,
            data,
            background_color,
            hover_background_color: None,
            stack: None,
            bar_thickness: None,
            border_radius: None,
            border_width: None,
            border_color: None,
            shares: None,
        }
    }

    pub fn labelled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_hover(mut self) -> Self {
        self.hover_background_color = Some(self.background_color.hovered());
        self
    }

    pub fn stacked(mut self, stack: &str) -> Self {
        self.stack = Some(stack.to_string());
        self
    }

    pub fn with_shares(mut self) -> Self {
        let whole = self
            .data
            .iter()
            .fold(0u64, |sum, value| sum.saturating_add(*value));
        self.shares = Some(
            self.data
                .iter()
                .map(|value| percent(*value, whole, SHARE_PRECISION))
                .collect(),
        );
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Label>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLabels {
    pub color: &'static str,
    pub padding: u32,
    pub use_point_style: bool,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: &'static str,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub background_color: &'static str,
    pub title_color: &'static str,
    pub body_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
    pub padding: u32,
    pub format: TooltipFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animation {
    pub duration: u32,
    pub easing: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
}

impl Axis {
    fn themed(font_size: Option<u32>) -> Self {
        Self {
            ticks: Some(Ticks {
                color: palette::TEXT,
                font: font_size.map(|size| Font { size }),
            }),
            grid: Some(Grid {
                color: palette::GRID,
            }),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<&'static str>,
    pub plugins: Plugins,
    pub animation: Animation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// Shared option bundle. Proportion charts always show their legend; bar
/// charts only when `show_legend` is set. `tooltip` overrides the kind's
/// default tooltip format.
pub fn chart_options(kind: ChartKind, show_legend: bool, tooltip: Option<TooltipFormat>) -> ChartOptions {
    let default_tooltip = match kind {
        ChartKind::Proportion => TooltipFormat::ShareOfTotal,
        _ => TooltipFormat::DatasetValue,
    };

    let (index_axis, scales) = match kind {
        ChartKind::Proportion => (None, None),
        ChartKind::Category | ChartKind::HorizontalCategory => {
            let horizontal = kind.is_horizontal();
            (
                Some(if horizontal { "y" } else { "x" }),
                Some(Scales {
                    x: Axis::themed(Some(11)),
                    y: Axis::themed(Some(if horizontal { 10 } else { 11 })),
                }),
            )
        }
        ChartKind::StackedComparison => (
            Some("y"),
            Some(Scales {
                x: Axis {
                    stacked: Some(true),
                    ..Axis::themed(None)
                },
                y: Axis {
                    display: Some(false),
                    stacked: Some(true),
                    ..Axis::default()
                },
            }),
        ),
    };

    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        index_axis,
        plugins: Plugins {
            legend: Legend {
                display: kind == ChartKind::Proportion || show_legend,
                position: "bottom",
                labels: LegendLabels {
                    color: palette::TEXT,
                    padding: 15,
                    use_point_style: true,
                    font: Font { size: 12 },
                },
            },
            tooltip: Tooltip {
                background_color: palette::TOOLTIP_BACKGROUND,
                title_color: palette::TEXT,
                body_color: palette::TEXT,
                border_color: palette::GRID,
                border_width: 1,
                padding: 10,
                format: tooltip.unwrap_or(default_tooltip),
            },
        },
        animation: Animation {
            duration: ANIMATION_MS,
            easing: "easeInOutQuart",
        },
        scales,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, labels: Vec<Label>, datasets: Vec<ChartDataset>, options: ChartOptions) -> Self {
        Self {
            chart_type: kind.chart_type(),
            data: ChartData { labels, datasets },
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub exploration_wrap: usize,
    pub problem_wrap: usize,
    pub top_problems: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            exploration_wrap: 20,
            problem_wrap: 25,
            top_problems: 8,
        }
    }
}

pub const SATISFACTION_SCALE: [&str; 5] = ["Very Poor", "Poor", "Average", "Good", "Excellent"];
pub const FRUSTRATION_SCALE: [&str; 5] = ["Very Low", "Low", "Moderate", "High", "Very High"];
pub const MISSING_SCALE: [&str; 5] = ["None", "Few", "Some", "Many", "Most"];
pub const OVERSPENDING_SCALE: [&str; 5] = ["Never", "Rarely", "Sometimes", "Often", "Always"];

const WORSENING: [&str; 5] = [palette::RED, palette::ORANGE, palette::YELLOW, palette::MINT, palette::GREEN];
const IMPROVING: [&str; 5] = [palette::GREEN, palette::MINT, palette::YELLOW, palette::ORANGE, palette::RED];

/// Configuration for `slot` from the current view.
pub fn build_chart(slot: ChartSlot, view: &Dataset, settings: &ChartSettings) -> ChartConfig {
    let demographics = &view.demographics;
    let behavior = &view.behavior;
    let insights = &view.insights;
    let metrics = &view.satisfaction_metrics;

    match slot {
        ChartSlot::Paradox => paradox_chart(view),
        ChartSlot::AuthenticityGap => authenticity_gap_chart(view),
        ChartSlot::Age => proportion_chart(
            ChartSeries::from_table(&demographics.age_groups),
            Paint::per_item(&palette::SERIES),
        ),
        ChartSlot::Profession => {
            let mut colors = palette::SERIES.to_vec();
            colors.extend(["#b1b1b1", "#d1d1d1"]);
            proportion_chart(
                ChartSeries::from_table(&demographics.professions),
                Paint::per_item(&colors),
            )
        }
        ChartSlot::Frequency => category_chart(
            ChartKind::Category,
            ChartSeries::from_table(&demographics.travel_frequency),
            "Travelers",
            palette::CYAN,
        ),
        ChartSlot::Budget => proportion_chart(
            ChartSeries::from_table(&behavior.budgets),
            Paint::per_item(&[palette::GREEN, palette::YELLOW, palette::MAGENTA, palette::RED]),
        ),
        ChartSlot::Companions => category_chart(
            ChartKind::Category,
            ChartSeries::from_table(&behavior.travel_preferences),
            "Preferences",
            palette::YELLOW,
        ),
        ChartSlot::Exploration => category_chart(
            ChartKind::HorizontalCategory,
            ChartSeries::from_table(&behavior.exploration_methods).wrapped(settings.exploration_wrap),
            "Methods",
            palette::PURPLE,
        ),
        ChartSlot::Experiences => category_chart(
            ChartKind::Category,
            ChartSeries::from_table(&insights.experiences_sought),
            "Interest Level",
            palette::MAGENTA,
        ),
        ChartSlot::Problems => category_chart(
            ChartKind::Category,
            ChartSeries::top(&insights.problems_faced, settings.top_problems)
                .wrapped(settings.problem_wrap),
            "Frequency",
            palette::RED,
        ),
        ChartSlot::Satisfaction => scale_chart(&metrics.satisfaction_scores, &SATISFACTION_SCALE, &WORSENING),
        ChartSlot::Frustration => scale_chart(&metrics.frustration_levels, &FRUSTRATION_SCALE, &IMPROVING),
        ChartSlot::MissingExperiences => {
            scale_chart(&metrics.missing_experiences, &MISSING_SCALE, &palette::SERIES)
        }
        ChartSlot::Overspending => scale_chart(&metrics.overspending, &OVERSPENDING_SCALE, &IMPROVING),
    }
}

/// Every slot's configuration, in render order.
pub fn build_charts(view: &Dataset, settings: &ChartSettings) -> Vec<(ChartSlot, ChartConfig)> {
    ChartSlot::ALL
        .iter()
        .map(|slot| (*slot, build_chart(*slot, view, settings)))
        .collect()
}

fn category_chart(kind: ChartKind, series: ChartSeries, label: &str, color: &str) -> ChartConfig {
    ChartConfig::new(
        kind,
        series.labels,
        vec![ChartDataset::new(series.values, Paint::solid(color)).labelled(label)],
        chart_options(kind, true, None),
    )
}

fn proportion_chart(series: ChartSeries, colors: Paint) -> ChartConfig {
    ChartConfig::new(
        ChartKind::Proportion,
        series.labels,
        vec![ChartDataset::new(series.values, colors).with_shares()],
        chart_options(ChartKind::Proportion, true, None),
    )
}

fn scale_chart(table: &CountTable, scale: &[&str], colors: &[&str]) -> ChartConfig {
    let series = ChartSeries::ordinal(table, scale);
    let mut dataset = ChartDataset::new(series.values, Paint::per_item(colors)).with_shares();
    dataset.border_width = Some(2);
    dataset.border_color = Some(palette::PANEL.to_string());
    ChartConfig::new(
        ChartKind::Proportion,
        series.labels,
        vec![dataset],
        chart_options(ChartKind::Proportion, true, None),
    )
}

fn paradox_chart(view: &Dataset) -> ChartConfig {
    let aspiration = view.behavior.exploration_methods.count_or_zero(SELF_GUIDED);
    let friction = view.insights.problems_faced.count_or_zero(DISCOVERY_DIFFICULTY);

    let mut dataset = ChartDataset::new(
        vec![aspiration, friction],
        Paint::per_item(&[palette::CYAN, palette::RED]),
    )
    .labelled("Number of Travelers")
    .with_hover();
    dataset.bar_thickness = Some(60);
    dataset.border_radius = Some(5);

    ChartConfig::new(
        ChartKind::Category,
        vec!["Desire for Independence".into(), "Struggle with Discovery".into()],
        vec![dataset],
        chart_options(ChartKind::Category, false, None),
    )
}

fn authenticity_gap_chart(view: &Dataset) -> ChartConfig {
    let problems = &view.insights.problems_faced;
    let desire = view.insights.experiences_sought.count_or_zero(LOCAL_CULTURE);

    ChartConfig::new(
        ChartKind::StackedComparison,
        vec!["".into()],
        vec![
            ChartDataset::new(vec![desire], Paint::solid(palette::GREEN))
                .labelled("Seeks Local Culture")
                .stacked("stack0"),
            ChartDataset::new(vec![problems.count_or_zero(SCAMS)], Paint::solid(palette::RED))
                .labelled("Faces Scams")
                .stacked("stack1"),
            ChartDataset::new(
                vec![problems.count_or_zero(CULTURE_BARRIER)],
                Paint::solid(palette::BLUE),
            )
            .labelled("Faces Cultural Barriers")
            .stacked("stack1"),
        ],
        chart_options(ChartKind::StackedComparison, true, Some(TooltipFormat::DatasetValue)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(label: Label) -> Vec<String> {
        match label {
            Label::Lines(lines) => lines,
            Label::Line(line) => vec![line],
        }
    }

    #[test]
    fn long_label_wraps_on_word_boundaries() {
        let wrapped = lines(wrap_label(DISCOVERY_DIFFICULTY, 25));
        assert_eq!(
            wrapped,
            vec!["Difficulty in finding", "locations beyond tourist", "spots"]
        );
        assert!(wrapped.iter().all(|line| line.chars().count() <= 25));
    }

    #[test]
    fn short_label_is_untouched() {
        assert_eq!(wrap_label("Solo", 20), Label::Line("Solo".into()));
    }

    #[test]
    fn oversized_word_keeps_its_own_line() {
        let wrapped = lines(wrap_label("a incomprehensibilities b", 10));
        assert_eq!(wrapped, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn proportion_options_always_show_legend() {
        let options = chart_options(ChartKind::Proportion, false, None);
        assert!(options.plugins.legend.display);
        assert_eq!(options.plugins.tooltip.format, TooltipFormat::ShareOfTotal);
        assert!(options.scales.is_none());
    }

    #[test]
    fn bar_options_follow_legend_flag_and_axis() {
        let hidden = chart_options(ChartKind::Category, false, None);
        assert!(!hidden.plugins.legend.display);
        assert_eq!(hidden.index_axis, Some("x"));

        let horizontal = chart_options(ChartKind::HorizontalCategory, true, None);
        assert!(horizontal.plugins.legend.display);
        assert_eq!(horizontal.index_axis, Some("y"));
        let y_font = horizontal.scales.unwrap().y.ticks.unwrap().font.unwrap();
        assert_eq!(y_font.size, 10);
    }

    #[test]
    fn options_share_palette_and_animation() {
        let kinds = [
            ChartKind::Category,
            ChartKind::HorizontalCategory,
            ChartKind::Proportion,
            ChartKind::StackedComparison,
        ];
        for kind in kinds {
            let options = chart_options(kind, true, None);
            assert_eq!(options.animation.duration, ANIMATION_MS);
            assert_eq!(options.plugins.tooltip.background_color, palette::TOOLTIP_BACKGROUND);
            assert_eq!(options.plugins.legend.labels.color, palette::TEXT);
        }
    }

    #[test]
    fn stacked_options_hide_category_axis() {
        let options = chart_options(ChartKind::StackedComparison, true, None);
        let scales = options.scales.unwrap();
        assert_eq!(scales.y.display, Some(false));
        assert_eq!(scales.x.stacked, Some(true));
    }

    #[test]
    fn problems_chart_keeps_top_eight_sorted() {
        let mut view = Dataset::default();
        view.insights.problems_faced = (0..10u64).map(|i| (format!("Problem {i}"), i)).collect();

        let config = build_chart(ChartSlot::Problems, &view, &ChartSettings::default());
        assert_eq!(config.data.labels.len(), 8);
        assert_eq!(config.data.datasets[0].data, vec![9, 8, 7, 6, 5, 4, 3, 2]);
        assert_eq!(config.data.labels[0], Label::Line("Problem 9".into()));
    }

    #[test]
    fn empty_view_builds_every_chart_with_zeroes() {
        let charts = build_charts(&Dataset::default(), &ChartSettings::default());
        assert_eq!(charts.len(), ChartSlot::ALL.len());

        let (_, paradox) = &charts[0];
        assert_eq!(paradox.data.datasets[0].data, vec![0, 0]);

        let satisfaction = charts
            .iter()
            .find(|(slot, _)| *slot == ChartSlot::Satisfaction)
            .map(|(_, config)| config)
            .unwrap();
        assert_eq!(satisfaction.data.datasets[0].data, vec![0; 5]);
        assert_eq!(satisfaction.data.datasets[0].shares, Some(vec![0.0; 5]));
    }

    #[test]
    fn doughnut_shares_use_one_decimal() {
        let mut view = Dataset::default();
        view.behavior.budgets = [("Low", 1), ("Mid", 1), ("High", 1)].into_iter().collect();

        let config = build_chart(ChartSlot::Budget, &view, &ChartSettings::default());
        assert_eq!(config.chart_type, "doughnut");
        assert_eq!(config.data.datasets[0].shares, Some(vec![33.3, 33.3, 33.3]));
    }

    #[test]
    fn satisfaction_reads_values_by_position() {
        let mut view = Dataset::default();
        view.satisfaction_metrics.satisfaction_scores =
            [("1", 5), ("2", 4), ("3", 3), ("4", 2), ("5", 1)].into_iter().collect();

        let config = build_chart(ChartSlot::Satisfaction, &view, &ChartSettings::default());
        assert_eq!(config.data.datasets[0].data, vec![5, 4, 3, 2, 1]);
        assert_eq!(config.data.labels[0], Label::Line("Very Poor".into()));
    }

    #[test]
    fn config_serializes_in_chartjs_shape() {
        let mut view = Dataset::default();
        view.demographics.travel_frequency = [("Monthly", 4)].into_iter().collect();

        let config = build_chart(ChartSlot::Frequency, &view, &ChartSettings::default());
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "bar");
        assert_eq!(value["data"]["labels"][0], "Monthly");
        assert_eq!(value["data"]["datasets"][0]["label"], "Travelers");
        assert_eq!(value["data"]["datasets"][0]["backgroundColor"], palette::CYAN);
        assert_eq!(value["options"]["maintainAspectRatio"], false);
        assert_eq!(value["options"]["plugins"]["tooltip"]["format"], "datasetValue");
    }

    #[test]
    fn slot_ids_match_serialized_names() {
        for slot in ChartSlot::ALL {
            assert_eq!(serde_json::to_value(slot).unwrap(), slot.id());
        }
    }
}
