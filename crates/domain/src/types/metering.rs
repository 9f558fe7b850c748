//! Metering records and statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Model;

/// A single metering record (`metering/data`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for MeteringData {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

/// An aggregated metering figure (`metering/statistics`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringStatistic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Model for MeteringStatistic {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn metering_data_survives_echo_from_server() {
        let original = MeteringData {
            id: Some("k1".into()),
            category: "Storage".into(),
            name: "files".into(),
            module_name: Some("Files".into()),
            value: 12.5,
            date_created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            extra: Map::new(),
        };

        let echoed = serde_json::to_string(&original).unwrap();
        let parsed: MeteringData = serde_json::from_str(&echoed).unwrap();

        assert_eq!(parsed, original);
        assert!(echoed.contains("\"moduleName\""));
        assert!(echoed.contains("\"dateCreated\""));
    }

    #[test]
    fn statistic_id_feeds_model_trait() {
        let stat: MeteringStatistic =
            serde_json::from_str(r#"{"id":"s1","category":"Requests","value":3}"#).unwrap();
        assert_eq!(Model::id(&stat), Some("s1".to_string()));
    }
}
