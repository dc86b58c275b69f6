use serde::Deserialize;
use serde_json::{Map, Value};

use crate::structs::threat::Threat;

/// Raw response body from `POST /api/v1/analyze`. Every field is defaulted
/// so a sparse payload still deserializes.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub analysis_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub threats: Vec<Threat>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub upgrade_message: Option<String>,
    #[serde(default)]
    pub limitation_notice: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Severity roll-up from the API. `total` is authoritative and may exceed
/// the number of threat records actually included (tier truncation).
#[derive(Debug, Default, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub critical: Option<u32>,
    #[serde(default)]
    pub high: Option<u32>,
    #[serde(default)]
    pub medium: Option<u32>,
    #[serde(default)]
    pub low: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sparse_payload_deserializes_with_defaults() {
        let response: AnalyzeResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.analysis_id, "");
        assert!(response.threats.is_empty());
        assert_eq!(response.summary.total, None);
        assert!(!response.truncated);
        assert!(response.metadata.is_empty());
    }

    #[test]
    fn truncated_payload_keeps_summary_total() {
        let response: AnalyzeResponse = serde_json::from_value(json!({
            "analysis_id": "ana_123",
            "status": "completed",
            "threats": [{"title": "A"}, {"title": "B"}],
            "summary": {"total": 5, "high": 2},
            "truncated": true,
            "upgrade_message": "Upgrade for full results"
        }))
        .unwrap();

        assert_eq!(response.summary.total, Some(5));
        assert_eq!(response.threats.len(), 2);
        assert!(response.truncated);
    }
}
