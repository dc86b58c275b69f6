use std::io::Write;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;

use stride_gpt_action::config::constants::{FREE_TIER_ANALYSES_PER_MONTH, FREE_TIER_MAX_THREATS};
use stride_gpt_action::enums::plan_tier::PlanTier;
use stride_gpt_action::enums::trigger_mode::TriggerMode;
use stride_gpt_action::enums::workflow::Workflow;
use stride_gpt_action::errors::ActionError;
use stride_gpt_action::helpers::outputs::write_outputs;
use stride_gpt_action::helpers::retry::RetryPolicy;
use stride_gpt_action::helpers::secrets::mask_secret;
use stride_gpt_action::services::reporter;
use stride_gpt_action::services::stride_gateway::map_error_status;
use stride_gpt_action::services::trigger_classifier::TriggerClassifier;
use stride_gpt_action::structs::action_config::ActionConfig;
use stride_gpt_action::structs::analysis_result::AnalysisResult;
use stride_gpt_action::structs::analyze_response::AnalyzeResponse;
use stride_gpt_action::structs::cli::Cli;
use stride_gpt_action::structs::usage_snapshot::UsageSnapshot;

fn comment_event(body: &str) -> serde_json::Value {
    json!({
        "event_name": "issue_comment",
        "event": {
            "comment": { "body": body },
            "issue": {
                "number": 17,
                "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/17" }
            }
        }
    })
}

#[test]
fn comment_event_flows_from_payload_to_workflow() {
    let workflow =
        TriggerClassifier::classify(&comment_event("hey @stride-gpt status please"), TriggerMode::Comment)
            .unwrap();
    assert_eq!(
        workflow,
        Some(Workflow::Comment {
            number: 17,
            is_pull_request: true,
            command: "status".to_string()
        })
    );
}

#[test]
fn unrelated_comments_are_skipped_without_error() {
    let workflow =
        TriggerClassifier::classify(&comment_event("LGTM, merging"), TriggerMode::Comment).unwrap();
    assert_eq!(workflow, None);
}

#[test]
fn api_response_renders_to_a_complete_report() {
    let response: AnalyzeResponse = serde_json::from_value(json!({
        "analysis_id": "ana_42",
        "status": "complete",
        "threats": [
            {
                "category": "Information Disclosure",
                "title": "Secret logged in plaintext",
                "severity": "low",
                "description": "The token is written to the debug log.",
                "file": "src/auth.rs",
                "line": 88
            },
            {
                "category": "Tampering",
                "title": "Unvalidated deserialization",
                "severity": "critical",
                "description": "User-controlled JSON reaches serde without bounds.",
                "file": "src/api.rs",
                "line": "12",
                "dread_score": 8.4,
                "affected_files": ["src/api.rs", "src/models.rs"]
            }
        ],
        "summary": { "total": 2 },
        "truncated": false
    }))
    .unwrap();

    let result = AnalysisResult::from_response(response);
    let doc = reporter::render_analysis_comment(&result, PlanTier::Free, None);

    // Critical threat sorts above the low one
    let critical_at = doc.find("Unvalidated deserialization").unwrap();
    let low_at = doc.find("Secret logged in plaintext").unwrap();
    assert!(critical_at < low_at);

    assert!(doc.contains("**Threats Found**: 2"));
    assert!(doc.contains("`src/api.rs:12`"));
    assert!(doc.contains("`src/auth.rs:88`"));
    assert!(doc.contains("**DREAD Score**: 8.4/10"));
    assert!(doc.contains("`src/api.rs`, `src/models.rs`"));
    // Not truncated, so no limitation banner
    assert!(!doc.contains("⚠️"));
    // Fallback footer without a live usage snapshot
    assert!(doc.contains(&format!("0 of {} free analyses", FREE_TIER_ANALYSES_PER_MONTH)));
}

#[test]
fn truncated_response_renders_exactly_one_banner() {
    let response: AnalyzeResponse = serde_json::from_value(json!({
        "analysis_id": "ana_43",
        "threats": [{ "title": "T", "severity": "high" }],
        "summary": { "total": 9 },
        "truncated": true,
        "limitation_notice": "Showing 5 of 9 threats."
    }))
    .unwrap();

    let result = AnalysisResult::from_response(response);
    let doc = reporter::render_analysis_comment(&result, PlanTier::Free, None);

    assert!(doc.contains("Showing 5 of 9 threats."));
    assert_eq!(doc.matches("⚠️").count(), 1);
    assert!(doc.contains(&format!("9 of {} max", FREE_TIER_MAX_THREATS)));
}

#[test]
fn limit_reached_sentinel_renders_the_fixed_template() {
    let doc = reporter::render_analysis_comment(&AnalysisResult::limit_reached(), PlanTier::Free, None);
    assert!(doc.starts_with("## 🛑 Monthly Analysis Limit Reached"));
    assert!(doc.contains(&format!("all {} free analyses", FREE_TIER_ANALYSES_PER_MONTH)));
}

#[test]
fn status_report_covers_the_billing_period() {
    let usage: UsageSnapshot = serde_json::from_value(json!({
        "plan": "starter",
        "analyses_used": 120,
        "analyses_limit": 500,
        "period_start": "2026-08-01T00:00:00Z",
        "period_end": "2026-09-01T00:00:00Z",
        "usage_trend": "down"
    }))
    .unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 15, 8, 0, 0).unwrap();

    let doc = reporter::render_status(&usage, now);
    assert!(doc.contains("**Plan**: Starter"));
    assert!(doc.contains("**Analyses Used**: 120 of 500"));
    assert!(doc.contains("**Remaining**: 380"));
    assert!(doc.contains("📉 Decreasing"));
    assert!(doc.contains("**Days Remaining**: 16 days"));
    // Paid plan, so no upsell
    assert!(!doc.contains("Want More Detailed Analysis?"));
}

#[test]
fn gateway_statuses_map_to_typed_errors() {
    assert!(matches!(
        map_error_status(402, r#"{"detail": "private repo not allowed"}"#),
        ActionError::PlanRestriction { .. }
    ));
    assert!(matches!(
        map_error_status(402, r#"{"detail": "monthly quota exhausted"}"#),
        ActionError::UsageLimitExceeded { .. }
    ));
    assert!(matches!(map_error_status(403, ""), ActionError::Forbidden { .. }));
    assert!(matches!(map_error_status(429, ""), ActionError::RateLimited));
    assert!(matches!(map_error_status(503, "down"), ActionError::Gateway { status: 503, .. }));
}

#[test]
fn retry_backoff_doubles_then_caps() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_after(1), Duration::from_secs(4));
    assert_eq!(policy.delay_after(2), Duration::from_secs(8));
    assert_eq!(policy.delay_after(3), Duration::from_secs(10));
}

#[tokio::test]
async fn retry_gives_up_on_non_transient_errors() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let policy = RetryPolicy::default();
    let calls = AtomicU32::new(0);
    let result: Result<(), _> = policy
        .run("test op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(ActionError::RateLimited) }
        })
        .await;

    assert!(matches!(result, Err(ActionError::RateLimited)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn config_assembles_context_from_the_event_file() {
    let dir = tempfile::tempdir().unwrap();
    let event_path = dir.path().join("event.json");
    let mut file = std::fs::File::create(&event_path).unwrap();
    write!(file, r#"{{"comment": {{"body": "@stride-gpt help"}}, "issue": {{"number": 3}}}}"#).unwrap();

    let path_str = event_path.to_str().unwrap().to_string();
    let config = ActionConfig::from_lookup(
        move |key| match key {
            "STRIDE_API_KEY" => Some("sk_live_abcdef".to_string()),
            "GITHUB_TOKEN" => Some("ghp_x".to_string()),
            "GITHUB_REPOSITORY" => Some("octo/widgets".to_string()),
            "GITHUB_EVENT_NAME" => Some("issue_comment".to_string()),
            "GITHUB_EVENT_PATH" => Some(path_str.clone()),
            _ => None,
        },
        &Cli::default(),
    )
    .unwrap();

    assert_eq!(config.context["event_name"], "issue_comment");
    assert_eq!(config.context["event"]["issue"]["number"], 3);

    let workflow = TriggerClassifier::classify(&config.context, config.trigger_mode).unwrap();
    assert_eq!(
        workflow,
        Some(Workflow::Comment {
            number: 3,
            is_pull_request: false,
            command: "help".to_string()
        })
    );
}

#[test]
fn step_outputs_accumulate_in_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gh_output");

    write_outputs(
        Some(&path),
        &[
            ("threat-count", "4".to_string()),
            ("report-url", "https://github.com/o/r/pull/2#issuecomment-1".to_string()),
        ],
    );

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("threat-count=4\n"));
    assert!(content.contains("report-url=https://github.com/o/r/pull/2#issuecomment-1\n"));
}

#[test]
fn api_keys_never_appear_unmasked() {
    let masked = mask_secret("sk_live_1234567890");
    assert!(!masked.contains("1234567890"));
    assert!(masked.starts_with("sk_"));
}
