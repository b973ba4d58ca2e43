use crate::models::{
    CountTable, Dataset, DilemmaInsights, InsightNarrative, KpiSummary, CULTURE_BARRIER,
    DISCOVERY_DIFFICULTY, NOT_AVAILABLE, SCAMS, SELF_GUIDED,
};

/// Decimal places for headline percentages on KPI and insight cards.
pub const HEADLINE_PRECISION: u32 = 0;

/// Label with the highest count. Ties go to the earliest label; an empty table gives "N/A".
pub fn top_key(table: &CountTable) -> String {
    let mut best: Option<(&str, u64)> = None;
    for (label, count) in table.iter() {
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn total(table: &CountTable) -> u64 {
    table
        .iter()
        .fold(0u64, |sum, (_, count)| sum.saturating_add(count))
}

/// `part` as a percentage of `whole`, rounded to `decimals` places. Zero when `whole` is zero.
pub fn percent(part: u64, whole: u64, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let scale = 10f64.powi(decimals as i32);
    (part as f64 / whole as f64 * 100.0 * scale).round() / scale
}

pub fn headline_percent(part: u64, whole: u64) -> u64 {
    percent(part, whole, HEADLINE_PRECISION) as u64
}

/// The `n` largest entries, highest first. Equal counts keep their table order.
pub fn top_n(table: &CountTable, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = table
        .iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

pub fn build_kpis(view: &Dataset) -> KpiSummary {
    let ages = &view.demographics.age_groups;
    let total_responses = total(ages);
    let top_age = top_key(ages);

    KpiSummary {
        total_responses,
        primary_age_group: top_age.strip_suffix(" years").unwrap_or(&top_age).to_string(),
        top_problem: top_key(&view.insights.problems_faced),
        insights: build_insights(view, total_responses),
    }
}

/// Independence and authenticity figures, relative to `total_responses`.
/// Returns `None` for an empty survey instead of dividing by zero.
pub fn build_insights(view: &Dataset, total_responses: u64) -> Option<DilemmaInsights> {
    if total_responses == 0 {
        return None;
    }

    let problems = &view.insights.problems_faced;
    let self_guided = view.behavior.exploration_methods.count_or_zero(SELF_GUIDED);

    Some(DilemmaInsights {
        independence_percent: headline_percent(self_guided, total_responses),
        difficulty_percent: headline_percent(
            problems.count_or_zero(DISCOVERY_DIFFICULTY),
            total_responses,
        ),
        top_experience: top_key(&view.insights.experiences_sought),
        scam_percent: headline_percent(problems.count_or_zero(SCAMS), total_responses),
        culture_percent: headline_percent(problems.count_or_zero(CULTURE_BARRIER), total_responses),
    })
}

impl DilemmaInsights {
    pub fn narrative(&self) -> InsightNarrative {
        InsightNarrative {
            independence_headline: format!(
                "{}% prefer self-guided exploration",
                self.independence_percent
            ),
            independence_detail: format!(
                "Yet, {}% of these independent travelers struggle to find authentic locations \
                 beyond the typical tourist spots. They have the will, but not the right tools.",
                self.difficulty_percent
            ),
            authenticity_headline: format!("#1 Desired Experience: {}", self.top_experience),
            authenticity_detail: format!(
                "Travelers crave genuine culture and adventure, but their top problems are \
                 scams ({}%) and the inability to find local culture ({}%), revealing a massive \
                 quality and trust gap.",
                self.scam_percent, self.culture_percent
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, u64)]) -> CountTable {
        pairs.iter().map(|(label, count)| (*label, *count)).collect()
    }

    #[test]
    fn total_sums_counts() {
        assert_eq!(total(&table(&[("a", 3), ("b", 4), ("c", 0)])), 7);
        assert_eq!(total(&CountTable::new()), 0);
    }

    #[test]
    fn top_key_finds_unique_max() {
        assert_eq!(top_key(&table(&[("a", 3), ("b", 9), ("c", 4)])), "b");
    }

    #[test]
    fn top_key_prefers_first_on_tie() {
        assert_eq!(top_key(&table(&[("a", 5), ("b", 5)])), "a");
    }

    #[test]
    fn top_key_of_empty_table_is_na() {
        assert_eq!(top_key(&CountTable::new()), "N/A");
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent(0, 0, 0), 0.0);
        assert_eq!(percent(17, 0, 1), 0.0);
        assert_eq!(headline_percent(5, 0), 0);
    }

    #[test]
    fn percent_rounds_to_precision() {
        assert_eq!(percent(1, 3, 0), 33.0);
        assert_eq!(percent(1, 3, 1), 33.3);
        assert_eq!(percent(2, 3, 0), 67.0);
        assert_eq!(headline_percent(1, 8), 13);
    }

    #[test]
    fn top_n_sorts_descending_and_keeps_order_on_ties() {
        let ranked = top_n(&table(&[("a", 1), ("b", 4), ("c", 4), ("d", 2)]), 3);
        let labels: Vec<&str> = ranked.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c", "d"]);
    }

    #[test]
    fn top_n_larger_than_table_returns_all() {
        assert_eq!(top_n(&table(&[("a", 1)]), 8).len(), 1);
    }

    #[test]
    fn kpis_for_small_survey() {
        let mut view = Dataset::default();
        view.demographics.age_groups = table(&[("18-25", 40), ("26-35", 60)]);
        view.insights.problems_faced = table(&[("Scams", 10), ("Other", 5)]);

        let kpis = build_kpis(&view);
        assert_eq!(kpis.total_responses, 100);
        assert_eq!(kpis.primary_age_group, "26-35");
        assert_eq!(kpis.top_problem, "Scams");
    }

    #[test]
    fn kpis_for_empty_survey_skip_insights() {
        let view = Dataset::default();
        let kpis = build_kpis(&view);
        assert_eq!(kpis.total_responses, 0);
        assert_eq!(kpis.primary_age_group, "N/A");
        assert!(kpis.insights.is_none());
    }

    #[test]
    fn primary_age_group_drops_years_suffix() {
        let mut view = Dataset::default();
        view.demographics.age_groups = table(&[("18-24 years", 2), ("25-34 years", 7)]);
        assert_eq!(build_kpis(&view).primary_age_group, "25-34");
    }

    #[test]
    fn primary_age_group_keeps_inner_years() {
        let mut view = Dataset::default();
        view.demographics.age_groups = table(&[("65 years and over", 4), ("18-24 years", 1)]);
        assert_eq!(build_kpis(&view).primary_age_group, "65 years and over");
    }

    #[test]
    fn insights_use_fixed_labels() {
        let mut view = Dataset::default();
        view.demographics.age_groups = table(&[("all", 200)]);
        view.behavior.exploration_methods = table(&[(SELF_GUIDED, 120)]);
        view.insights.problems_faced = table(&[
            (DISCOVERY_DIFFICULTY, 90),
            (SCAMS, 50),
            (CULTURE_BARRIER, 30),
        ]);
        view.insights.experiences_sought = table(&[("Food", 10), ("Local culture and customs", 80)]);

        let insights = build_insights(&view, 200).unwrap();
        assert_eq!(insights.independence_percent, 60);
        assert_eq!(insights.difficulty_percent, 45);
        assert_eq!(insights.scam_percent, 25);
        assert_eq!(insights.culture_percent, 15);
        assert_eq!(insights.top_experience, "Local culture and customs");

        let narrative = insights.narrative();
        assert!(narrative.independence_headline.starts_with("60%"));
        assert!(narrative.authenticity_detail.contains("scams (25%)"));
    }

    #[test]
    fn insights_treat_missing_labels_as_zero() {
        let mut view = Dataset::default();
        view.demographics.age_groups = table(&[("all", 10)]);

        let insights = build_insights(&view, 10).unwrap();
        assert_eq!(insights.independence_percent, 0);
        assert_eq!(insights.scam_percent, 0);
        assert_eq!(insights.top_experience, "N/A");
    }
}
