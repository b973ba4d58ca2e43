use crate::models::Dataset;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

pub const SCALE_RANGE: RangeInclusive<f64> = 0.5..=0.8;

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub age: Selection,
    pub profession: Selection,
}

impl FilterCriteria {
    pub fn is_all(&self) -> bool {
        self.age.is_all() && self.profession.is_all()
    }
}

/// Approximate filter. The dataset only carries aggregate counts, so any
/// selection other than "all" shrinks every count by one random factor.
pub fn apply_filter(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    apply_filter_with(dataset, criteria, &mut rand::thread_rng())
}

pub fn apply_filter_with<R: Rng>(
    dataset: &Dataset,
    criteria: &FilterCriteria,
    rng: &mut R,
) -> Dataset {
    if criteria.is_all() {
        return dataset.clone();
    }

    let factor = rng.gen_range(SCALE_RANGE);
    debug!(factor, ?criteria, "scaling dataset for filter");
    dataset.map_counts(|count| scale_count(count, factor))
}

fn scale_count(count: u64, factor: f64) -> u64 {
    ((count as f64 * factor).floor() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Dataset {
        let mut data = Dataset::default();
        data.demographics.age_groups = [("18-24 years", 40), ("25-34 years", 61), ("35+", 1)]
            .into_iter()
            .collect();
        data.behavior.budgets = [("Low", 13), ("High", 7)].into_iter().collect();
        data.insights.problems_faced = [("Scams and overcharging", 200)].into_iter().collect();
        data.satisfaction_metrics.overspending = [("Never", 2), ("Always", 3)].into_iter().collect();
        data
    }

    fn criteria(age: &str, profession: &str) -> FilterCriteria {
        FilterCriteria {
            age: Selection::from(age.to_string()),
            profession: Selection::from(profession.to_string()),
        }
    }

    #[test]
    fn all_criteria_is_identity() {
        let data = sample();
        let view = apply_filter(&data, &FilterCriteria::default());
        assert_eq!(view, data);
    }

    #[test]
    fn scaled_counts_stay_between_one_and_source() {
        let data = sample();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let view = apply_filter_with(&data, &criteria("25-34 years", "all"), &mut rng);
            for (source, scaled) in data.tables().iter().zip(view.tables().iter()) {
                assert_eq!(source.labels(), scaled.labels());
                for ((_, before), (_, after)) in source.iter().zip(scaled.iter()) {
                    assert!(after >= 1);
                    assert!(after <= before);
                }
            }
        }
    }

    #[test]
    fn one_factor_per_invocation() {
        let mut data = Dataset::default();
        data.demographics.age_groups = [("a", 1000)].into_iter().collect();
        data.behavior.budgets = [("b", 1000)].into_iter().collect();

        let view = apply_filter_with(&data, &criteria("all", "Student"), &mut StdRng::seed_from_u64(3));
        let scaled = view.demographics.age_groups.get("a").unwrap();
        assert!((500..=800).contains(&scaled));
        assert_eq!(view.behavior.budgets.get("b"), Some(scaled));
    }

    #[test]
    fn source_is_untouched() {
        let data = sample();
        let before = data.clone();
        let _ = apply_filter(&data, &criteria("18-24 years", "all"));
        assert_eq!(data, before);
    }

    #[test]
    fn empty_tables_stay_empty() {
        let data = Dataset::default();
        let view = apply_filter(&data, &criteria("x", "y"));
        assert!(view.tables().iter().all(|table: &&CountTable| table.is_empty()));
    }

    #[test]
    fn selection_parses_all_case_insensitively() {
        let parsed: FilterCriteria =
            serde_json::from_str(r#"{"age": "All", "profession": "Student"}"#).unwrap();
        assert!(parsed.age.is_all());
        assert_eq!(parsed.profession, Selection::Only("Student".into()));
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            serde_json::json!({"age": "all", "profession": "Student"})
        );
    }

    #[test]
    fn missing_dimensions_default_to_all() {
        let parsed: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert!(parsed.is_all());
    }
}
