use serde::Deserialize;

use crate::enums::plan_tier::PlanTier;
use crate::enums::usage_trend::UsageTrend;

/// Response body from `GET /api/v1/usage`. Like the analysis payload, the
/// schema is loose; everything is defaulted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageSnapshot {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub analyses_used: u32,
    #[serde(default)]
    pub analyses_limit: u32,
    #[serde(default)]
    pub features_available: Vec<String>,
    #[serde(default)]
    pub period_start: Option<String>,
    #[serde(default)]
    pub period_end: Option<String>,
    #[serde(default)]
    pub daily_average: Option<f64>,
    #[serde(default)]
    pub projected_usage: Option<f64>,
    #[serde(default)]
    pub usage_trend: Option<String>,
    #[serde(default)]
    pub api_key_created: Option<String>,
    #[serde(default)]
    pub last_usage: Option<String>,
}

impl UsageSnapshot {
    pub fn plan_tier(&self) -> PlanTier {
        PlanTier::parse(self.plan.as_deref())
    }

    pub fn trend(&self) -> UsageTrend {
        UsageTrend::parse(self.usage_trend.as_deref())
    }

    pub fn remaining(&self) -> i64 {
        i64::from(self.analyses_limit) - i64::from(self.analyses_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_a_full_snapshot() {
        let snapshot: UsageSnapshot = serde_json::from_value(json!({
            "plan": "FREE",
            "analyses_used": 10,
            "analyses_limit": 50,
            "period_start": "2026-08-01T00:00:00Z",
            "period_end": "2026-09-01T00:00:00Z",
            "daily_average": 0.7,
            "usage_trend": "up"
        }))
        .unwrap();

        assert_eq!(snapshot.plan_tier(), PlanTier::Free);
        assert_eq!(snapshot.trend(), UsageTrend::Up);
        assert_eq!(snapshot.remaining(), 40);
    }

    #[test]
    fn empty_snapshot_defaults() {
        let snapshot: UsageSnapshot = serde_json::from_value(json!({})).unwrap();
        assert_eq!(snapshot.plan_tier(), PlanTier::Unknown);
        assert_eq!(snapshot.trend(), UsageTrend::Stable);
        assert_eq!(snapshot.remaining(), 0);
    }

    #[test]
    fn overdrawn_usage_goes_negative() {
        let snapshot: UsageSnapshot = serde_json::from_value(json!({
            "analyses_used": 55,
            "analyses_limit": 50
        }))
        .unwrap();
        assert_eq!(snapshot.remaining(), -5);
    }
}
