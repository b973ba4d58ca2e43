use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

pub const SELF_GUIDED: &str = "Self guided with google maps";
pub const DISCOVERY_DIFFICULTY: &str = "Difficulty in finding locations beyond tourist spots";
pub const SCAMS: &str = "Scams and overcharging";
pub const CULTURE_BARRIER: &str = "Hard to explore local traditions and culture";
pub const LOCAL_CULTURE: &str = "Local culture and customs";

pub const NOT_AVAILABLE: &str = "N/A";

/// Label -> respondent count, kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: Vec<(String, u64)>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a count. Overwriting keeps the label's original position.
    pub fn insert(&mut self, label: impl Into<String>, count: u64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((label, count)),
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, count)| *count)
    }

    /// Count for `label`, or 0 when the table has no such label.
    pub fn count_or_zero(&self, label: &str) -> u64 {
        self.get(label).unwrap_or_else(|| {
            warn!(label, "label missing from dataset, using 0");
            0
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// New table with the same labels in the same order and every count passed through `f`.
    pub fn map_counts(&self, f: impl Fn(u64) -> u64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(label, count)| (label.clone(), f(*count)))
                .collect(),
        }
    }
}

impl<L: Into<String>> FromIterator<(L, u64)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (L, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (label, count) in iter {
            table.insert(label, count);
        }
        table
    }
}

impl Serialize for CountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CountTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountTableVisitor;

        impl<'de> Visitor<'de> for CountTableVisitor {
            type Value = CountTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category labels to non-negative integer counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CountTable, A::Error> {
                let mut table = CountTable::new();
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    table.insert(label, count);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(CountTableVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age_groups: CountTable,
    pub professions: CountTable,
    pub travel_frequency: CountTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Behavior {
    pub budgets: CountTable,
    pub travel_preferences: CountTable,
    pub exploration_methods: CountTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightTables {
    pub problems_faced: CountTable,
    pub experiences_sought: CountTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatisfactionMetrics {
    pub satisfaction_scores: CountTable,
    pub frustration_levels: CountTable,
    pub missing_experiences: CountTable,
    pub overspending: CountTable,
}

/// The survey snapshot. A filtered view is the same type, cloned and possibly scaled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub demographics: Demographics,
    pub behavior: Behavior,
    pub insights: InsightTables,
    pub satisfaction_metrics: SatisfactionMetrics,
}

impl Dataset {
    /// Every leaf table, in document order.
    pub fn tables(&self) -> [&CountTable; 12] {
        [
            &self.demographics.age_groups,
            &self.demographics.professions,
            &self.demographics.travel_frequency,
            &self.behavior.budgets,
            &self.behavior.travel_preferences,
            &self.behavior.exploration_methods,
            &self.insights.problems_faced,
            &self.insights.experiences_sought,
            &self.satisfaction_metrics.satisfaction_scores,
            &self.satisfaction_metrics.frustration_levels,
            &self.satisfaction_metrics.missing_experiences,
            &self.satisfaction_metrics.overspending,
        ]
    }

    /// Copy of the dataset with `f` applied to every leaf count.
    pub fn map_counts(&self, f: impl Fn(u64) -> u64) -> Self {
        let f = &f;
        Self {
            demographics: Demographics {
                age_groups: self.demographics.age_groups.map_counts(f),
                professions: self.demographics.professions.map_counts(f),
                travel_frequency: self.demographics.travel_frequency.map_counts(f),
            },
            behavior: Behavior {
                budgets: self.behavior.budgets.map_counts(f),
                travel_preferences: self.behavior.travel_preferences.map_counts(f),
                exploration_methods: self.behavior.exploration_methods.map_counts(f),
            },
            insights: InsightTables {
                problems_faced: self.insights.problems_faced.map_counts(f),
                experiences_sought: self.insights.experiences_sought.map_counts(f),
            },
            satisfaction_metrics: SatisfactionMetrics {
                satisfaction_scores: self.satisfaction_metrics.satisfaction_scores.map_counts(f),
                frustration_levels: self.satisfaction_metrics.frustration_levels.map_counts(f),
                missing_experiences: self.satisfaction_metrics.missing_experiences.map_counts(f),
                overspending: self.satisfaction_metrics.overspending.map_counts(f),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DilemmaInsights {
    pub independence_percent: u64,
    pub difficulty_percent: u64,
    pub top_experience: String,
    pub scam_percent: u64,
    pub culture_percent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_responses: u64,
    pub primary_age_group: String,
    pub top_problem: String,
    #[serde(flatten)]
    pub insights: Option<DilemmaInsights>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightNarrative {
    pub independence_headline: String,
    pub independence_detail: String,
    pub authenticity_headline: String,
    pub authenticity_detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub ages: Vec<String>,
    pub professions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_table_keeps_document_order() {
        let table: CountTable = serde_json::from_str(r#"{"zeta": 3, "alpha": 1, "mid": 2}"#).unwrap();
        assert_eq!(table.labels(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"zeta":3,"alpha":1,"mid":2}"#
        );
    }

    #[test]
    fn count_table_rejects_negative_counts() {
        let result = serde_json::from_str::<CountTable>(r#"{"a": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_label_overwrites_in_place() {
        let table: CountTable = [("a", 1), ("b", 2), ("a", 5)].into_iter().collect();
        assert_eq!(table.labels(), vec!["a", "b"]);
        assert_eq!(table.get("a"), Some(5));
    }

    #[test]
    fn missing_label_counts_as_zero() {
        let table: CountTable = [("a", 1)].into_iter().collect();
        assert_eq!(table.count_or_zero("nope"), 0);
    }

    #[test]
    fn dataset_requires_every_section() {
        let result = serde_json::from_str::<Dataset>(r#"{"demographics": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn clone_is_independent() {
        let mut source = Dataset::default();
        source.demographics.age_groups.insert("18-25", 4);
        let mut copy = source.clone();
        copy.demographics.age_groups.insert("18-25", 9);
        assert_eq!(source.demographics.age_groups.get("18-25"), Some(4));
    }

    #[test]
    fn kpis_without_insights_omit_insight_fields() {
        let summary = KpiSummary {
            total_responses: 0,
            primary_age_group: NOT_AVAILABLE.to_string(),
            top_problem: NOT_AVAILABLE.to_string(),
            insights: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["totalResponses"], 0);
        assert!(value.get("independencePercent").is_none());
    }
}
