use serde_json::{Map, Value};

use crate::structs::analyze_response::AnalyzeResponse;
use crate::structs::threat::Threat;

/// Normalized analysis outcome, the only shape the renderer consumes.
/// Built once per invocation by the orchestrator and immutable after that.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    /// Authoritative count from the remote summary; may exceed
    /// `threats.len()` when the tier truncated the detail list.
    pub threat_count: u32,
    pub threats: Vec<Threat>,
    /// Empty when no analysis actually ran.
    pub analysis_id: String,
    pub usage_info: Map<String, Value>,
    pub is_limited: bool,
    pub upgrade_message: Option<String>,
    pub limitation_notice: Option<String>,
}

impl AnalysisResult {
    /// Zero-threat result for short-circuit paths (no files changed, blank
    /// issue body). The gateway is never called for these.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sentinel result for the recovered usage-limit case.
    pub fn limit_reached() -> Self {
        let mut usage_info = Map::new();
        usage_info.insert("limit_reached".to_string(), Value::Bool(true));

        Self {
            threat_count: 0,
            threats: Vec::new(),
            analysis_id: String::new(),
            usage_info,
            is_limited: true,
            upgrade_message: Some(
                "Monthly analysis limit reached. Upgrade to continue analyzing.".to_string(),
            ),
            limitation_notice: None,
        }
    }

    pub fn from_response(response: AnalyzeResponse) -> Self {
        let threat_count = response
            .summary
            .total
            .unwrap_or(response.threats.len() as u32);

        Self {
            threat_count,
            threats: response.threats,
            analysis_id: response.analysis_id,
            usage_info: response.metadata,
            is_limited: response.truncated,
            upgrade_message: response.upgrade_message,
            limitation_notice: response.limitation_notice,
        }
    }

    pub fn limit_was_reached(&self) -> bool {
        self.usage_info
            .get("limit_reached")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_total_wins_over_threat_list_length() {
        let response: AnalyzeResponse = serde_json::from_value(json!({
            "analysis_id": "ana_1",
            "threats": [{"title": "A"}, {"title": "B"}],
            "summary": {"total": 5},
            "truncated": true
        }))
        .unwrap();

        let result = AnalysisResult::from_response(response);
        assert_eq!(result.threat_count, 5);
        assert_eq!(result.threats.len(), 2);
        assert!(result.is_limited);
    }

    #[test]
    fn missing_summary_total_falls_back_to_list_length() {
        let response: AnalyzeResponse = serde_json::from_value(json!({
            "threats": [{"title": "A"}]
        }))
        .unwrap();

        let result = AnalysisResult::from_response(response);
        assert_eq!(result.threat_count, 1);
    }

    #[test]
    fn limit_sentinel_round_trips() {
        let result = AnalysisResult::limit_reached();
        assert!(result.limit_was_reached());
        assert!(result.is_limited);
        assert_eq!(result.threat_count, 0);
        assert_eq!(result.analysis_id, "");

        assert!(!AnalysisResult::empty().limit_was_reached());
    }
}
