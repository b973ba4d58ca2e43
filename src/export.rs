use crate::errors::ExportError;
use crate::models::Dataset;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const FILE_PREFIX: &str = "travel-analytics";

/// The downloadable document: when it was taken and the view it was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub timestamp: String,
    pub data: Dataset,
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub body: String,
}

pub fn export(view: &Dataset) -> Result<ExportArtifact, ExportError> {
    export_at(Utc::now(), view)
}

pub fn export_at(now: DateTime<Utc>, view: &Dataset) -> Result<ExportArtifact, ExportError> {
    let document = ExportDocument {
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        data: view.clone(),
    };
    let body = serde_json::to_string_pretty(&document)?;

    Ok(ExportArtifact {
        file_name: format!("{FILE_PREFIX}-{}.json", now.format("%Y-%m-%d")),
        body,
    })
}

pub fn read_export(body: &str) -> Result<ExportDocument, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn view() -> Dataset {
        let mut view = Dataset::default();
        view.demographics.age_groups = [("26-35", 60), ("18-25", 40)].into_iter().collect();
        view.insights.problems_faced = [("Scams", 10), ("Other", 5)].into_iter().collect();
        view.satisfaction_metrics.satisfaction_scores =
            [("Very Poor", 1), ("Poor", 2), ("Average", 3), ("Good", 4), ("Excellent", 5)]
                .into_iter()
                .collect();
        view
    }

    #[test]
    fn export_round_trips_view() {
        let view = view();
        let artifact = export(&view).unwrap();
        let document = read_export(&artifact.body).unwrap();
        assert_eq!(document.data, view);
        assert_eq!(
            document.data.demographics.age_groups.labels(),
            vec!["26-35", "18-25"]
        );
    }

    #[test]
    fn export_names_file_by_date_and_stamps_iso_time() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 7).unwrap();
        let artifact = export_at(now, &view()).unwrap();
        assert_eq!(artifact.file_name, "travel-analytics-2026-03-09.json");

        let document = read_export(&artifact.body).unwrap();
        assert_eq!(document.timestamp, "2026-03-09T14:05:07.000Z");
        assert!(DateTime::parse_from_rfc3339(&document.timestamp).is_ok());
    }
}
