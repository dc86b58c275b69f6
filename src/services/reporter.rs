use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::config::constants::{
    DOCS_URL, FREE_TIER_ANALYSES_PER_MONTH, FREE_TIER_MAX_THREATS, PRICING_URL, SUPPORT_URL,
};
use crate::enums::plan_tier::PlanTier;
use crate::errors::ActionResult;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::threat::Threat;
use crate::structs::usage_snapshot::UsageSnapshot;
use crate::traits::analysis_api::AnalysisApi;
use crate::traits::source_control::SourceControl;

/// Formats analysis results as markdown and posts them back as comments.
/// All formatting lives in pure functions; the struct only adds the live
/// usage fetch and the comment posting.
pub struct CommentReporter {
    github: Arc<dyn SourceControl>,
    stride: Arc<dyn AnalysisApi>,
}

impl CommentReporter {
    pub fn new(github: Arc<dyn SourceControl>, stride: Arc<dyn AnalysisApi>) -> Self {
        Self { github, stride }
    }

    /// Post analysis results, with live usage counts in the footer when the
    /// usage endpoint answers in time.
    pub async fn post_analysis_comment(
        &self,
        number: u64,
        result: &AnalysisResult,
        is_pull_request: bool,
    ) -> ActionResult<String> {
        let live = self.stride.fetch_usage().await.ok();
        let plan = live.as_ref().map(|u| u.plan_tier()).unwrap_or(PlanTier::Unknown);
        let body = render_analysis_comment(result, plan, live.as_ref());
        self.post(number, &body, is_pull_request).await
    }

    pub async fn post_help_comment(&self, number: u64, is_pull_request: bool) -> ActionResult<String> {
        self.post(number, &render_help(), is_pull_request).await
    }

    pub async fn post_status_comment(
        &self,
        number: u64,
        usage: &UsageSnapshot,
        is_pull_request: bool,
    ) -> ActionResult<String> {
        let body = render_status(usage, Utc::now());
        self.post(number, &body, is_pull_request).await
    }

    pub async fn post_error_comment(
        &self,
        number: u64,
        error_message: &str,
        is_pull_request: bool,
    ) -> ActionResult<String> {
        self.post(number, &render_error(error_message), is_pull_request).await
    }

    async fn post(&self, number: u64, body: &str, is_pull_request: bool) -> ActionResult<String> {
        if is_pull_request {
            self.github.post_pr_comment(number, body).await
        } else {
            self.github.post_issue_comment(number, body).await
        }
    }
}

/// Top-level dispatch: limit-reached beats zero-threat beats the full
/// listing. Exactly one template renders.
pub fn render_analysis_comment(
    result: &AnalysisResult,
    plan: PlanTier,
    live_usage: Option<&UsageSnapshot>,
) -> String {
    if result.limit_was_reached() {
        render_limit_reached()
    } else if result.threat_count == 0 {
        render_no_threats(result, plan, live_usage)
    } else {
        render_threats(result, plan, live_usage)
    }
}

fn report_title(plan: PlanTier) -> String {
    if plan.is_paid() {
        format!("## 🛡️ STRIDE Security Analysis ({} Plan)", plan.label())
    } else {
        "## 🛡️ STRIDE Security Analysis (Free Tier)".to_string()
    }
}

pub fn render_threats(
    result: &AnalysisResult,
    plan: PlanTier,
    live_usage: Option<&UsageSnapshot>,
) -> String {
    let counts = severity_counts(&result.threats);

    let threats_found = if result.is_limited && !plan.is_paid() {
        format!("{} of {} max", result.threat_count, FREE_TIER_MAX_THREATS)
    } else {
        result.threat_count.to_string()
    };

    let mut lines = vec![
        report_title(plan),
        String::new(),
        "### Summary".to_string(),
        format!("- **Threats Found**: {}", threats_found),
        format!(
            "- **Severity Levels**: {} Critical, {} High, {} Medium, {} Low, {} Info",
            counts[0], counts[1], counts[2], counts[3], counts[4]
        ),
        String::new(),
        "### Identified Threats".to_string(),
        String::new(),
    ];

    for threat in sorted_by_severity(&result.threats) {
        lines.extend(threat_block(threat));
    }

    if let Some(banner) = limitation_banner(result) {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(banner);
        lines.push(String::new());
    }

    if !plan.is_paid() {
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(upgrade_prompt());
        lines.push(String::new());
    }

    lines.push(usage_footer(result, live_usage));

    lines.join("\n")
}

/// Stable order: severity rank ascending, ties keep the API order.
pub fn sorted_by_severity(threats: &[Threat]) -> Vec<&Threat> {
    let mut ordered: Vec<&Threat> = threats.iter().collect();
    ordered.sort_by_key(|t| t.severity().rank());
    ordered
}

/// Tally per canonical bucket, indexed by severity rank. Unrecognized
/// severities land in medium.
pub fn severity_counts(threats: &[Threat]) -> [u32; 5] {
    let mut counts = [0u32; 5];
    for threat in threats {
        counts[threat.severity().rank() as usize] += 1;
    }
    counts
}

fn threat_block(threat: &Threat) -> Vec<String> {
    let severity = threat.severity();
    let mut lines = vec![
        format!("#### {} {}: {}", severity.marker(), severity.label(), threat.title()),
        format!("**Category**: {}", threat.category()),
    ];

    if let Some(file) = threat.file() {
        match threat.line_label() {
            Some(line) => lines.push(format!("**File**: `{}:{}`", file, line)),
            None => lines.push(format!("**File**: `{}`", file)),
        }
    }

    if let Some(score) = threat.dread_score {
        lines.push(format!("**DREAD Score**: {}/10", score));
    }

    if !threat.affected_files.is_empty() {
        lines.push(format!("**Affected Files**: `{}`", threat.affected_files.join("`, `")));
    }

    lines.push(format!("**Description**: {}", threat.description()));
    lines.push(String::new());
    lines
}

/// Either the API's verbatim limitation notice or the generic free-tier
/// banner when results were truncated. Never both.
fn limitation_banner(result: &AnalysisResult) -> Option<String> {
    if let Some(notice) = &result.limitation_notice {
        Some(format!("⚠️ **{}**\n\n[Upgrade →]({})", notice, PRICING_URL))
    } else if result.is_limited {
        let message = result
            .upgrade_message
            .as_deref()
            .unwrap_or("Free tier results are limited. Upgrade for the full analysis.");
        Some(format!("⚠️ **{}**\n\n[Upgrade →]({})", message, PRICING_URL))
    } else {
        None
    }
}

pub fn render_no_threats(
    result: &AnalysisResult,
    plan: PlanTier,
    live_usage: Option<&UsageSnapshot>,
) -> String {
    let footer = usage_footer(result, live_usage);

    if plan.is_paid() {
        format!(
            "{}

### ✅ No Security Threats Detected

No threats were identified in the analyzed changes. Full {} plan analysis \
was applied, including DREAD scoring and deep pattern recognition.

{}",
            report_title(plan),
            plan.label(),
            footer
        )
    } else {
        format!(
            "{}

### ✅ No Security Threats Detected

Great job! No obvious security threats were found in the changed files.

### Analysis Details
- **Analysis Type**: Basic STRIDE methodology
- **Severity Levels**: Low/Medium/High

### 💡 Want Deeper Analysis?

While no obvious threats were found, STRIDE-GPT Pro offers:
- 🔍 **Deep code analysis** with AI-powered pattern recognition
- 🌳 **Attack tree generation** to visualize potential attack paths
- 📊 **DREAD scoring** for risk prioritization
- 🛠️ **Detailed remediation** guidance
- 🔒 **Private repository** support

[Upgrade to Pro →]({})

{}",
            report_title(plan),
            PRICING_URL,
            footer
        )
    }
}

/// Fixed template for the recovered usage-limit case. No interpolation
/// beyond the configured tier numbers.
pub fn render_limit_reached() -> String {
    format!(
        "## 🛑 Monthly Analysis Limit Reached

You've used all {} free analyses for this month. Your limit will reset at \
the beginning of next month.

### Continue Analyzing Today

Upgrade to a paid plan for:
- ✅ **Unlimited analyses**
- ✅ **Advanced threat detection**
- ✅ **DREAD risk scoring**
- ✅ **Attack tree diagrams**
- ✅ **Private repository support**
- ✅ **Priority support**

### Pricing Plans
- **Starter** ($29/month): 500 analyses, all Pro features
- **Pro** ($99/month): 2,500 analyses, API access
- **Enterprise** ($299/month): Unlimited analyses, SLA support

[Upgrade Now →]({})",
        FREE_TIER_ANALYSES_PER_MONTH, PRICING_URL
    )
}

/// Footer for every analysis document: live counts when the usage endpoint
/// answered, otherwise whatever counts the result itself carried.
pub fn usage_footer(result: &AnalysisResult, live_usage: Option<&UsageSnapshot>) -> String {
    match live_usage {
        Some(usage) => format!(
            "\n*You've used {} of {} analyses this month ({} plan)*",
            usage.analyses_used,
            usage.analyses_limit,
            usage.plan_tier().label()
        ),
        None => {
            let used = result
                .usage_info
                .get("analyses_used")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            let limit = result
                .usage_info
                .get("analyses_limit")
                .and_then(|v| v.as_u64())
                .unwrap_or(u64::from(FREE_TIER_ANALYSES_PER_MONTH));
            format!("\n*You've used {} of {} free analyses this month*", used, limit)
        }
    }
}

fn upgrade_prompt() -> String {
    format!(
        "### 📈 Want More Detailed Analysis?
Upgrade to STRIDE-GPT Pro for:
- ✨ DREAD risk scoring
- 🌳 Attack tree visualization
- 🛠️ Detailed mitigation steps
- 🔒 Private repository support
- 📊 Compliance mapping

[Get Started →]({})",
        PRICING_URL
    )
}

pub fn render_help() -> String {
    format!(
        "## 🛡️ STRIDE-GPT Help

### Available Commands
- `@stride-gpt analyze` - Run security analysis on changed files
- `@stride-gpt help` - Show this help message
- `@stride-gpt status` - Check your usage limits

### Free Tier Limits
- **{} analyses per month** per GitHub account
- **{} threats maximum** per analysis
- **Public repositories only**
- **Basic severity ratings** (Low/Medium/High)

### Want More?
Upgrade to STRIDE-GPT Pro for:
- ✨ Unlimited analyses
- 🌳 Attack tree visualization
- 📊 DREAD risk scoring
- 🔒 Private repository support
- 🛠️ Detailed mitigation steps
- 📋 Compliance mapping

[View Pricing →]({})",
        FREE_TIER_ANALYSES_PER_MONTH, FREE_TIER_MAX_THREATS, PRICING_URL
    )
}

pub fn render_error(error_message: &str) -> String {
    format!(
        "## ❌ STRIDE-GPT Error

{}

### Need Help?
- Use `@stride-gpt help` to see available commands
- Visit [documentation]({})
- Contact [support]({})",
        error_message, DOCS_URL, SUPPORT_URL
    )
}

/// Usage-report document. `now` is injected so the output is a
/// deterministic function of its inputs.
pub fn render_status(usage: &UsageSnapshot, now: DateTime<Utc>) -> String {
    let plan = usage.plan_tier();
    let trend = usage.trend();

    let mut lines = vec![
        "## 📊 STRIDE-GPT Usage Status".to_string(),
        String::new(),
        "### Current Month".to_string(),
        format!("- **Plan**: {}", plan.label()),
        format!(
            "- **Analyses Used**: {} of {}",
            usage.analyses_used, usage.analyses_limit
        ),
        format!("- **Remaining**: {}", usage.remaining().max(0)),
        format!("- **Usage Trend**: {} {}", trend.marker(), trend.label()),
    ];

    if let Some(average) = usage.daily_average {
        lines.push(format!("- **Daily Average**: {} analyses/day", average));
    }
    if let Some(projected) = usage.projected_usage {
        lines.push(format!("- **Projected Usage**: {} analyses", projected));
    }

    lines.push(String::new());
    lines.push("### Billing Period".to_string());
    lines.push(format!(
        "- **Current Period**: {} to {}",
        format_human_date(usage.period_start.as_deref()),
        format_human_date(usage.period_end.as_deref())
    ));
    if let Some(remaining) = usage.period_end.as_deref().and_then(|end| days_remaining(end, now)) {
        lines.push(format!("- **Days Remaining**: {}", remaining));
    }

    lines.push(String::new());
    lines.push(format!("### {} Plan Features", plan.label()));
    for feature in plan.features() {
        lines.push(format!("- {}", feature));
    }

    lines.push(String::new());
    lines.push("### Account Details".to_string());
    let mut any_detail = false;
    if let Some(created) = usage.api_key_created.as_deref() {
        lines.push(format!("- **API Key Created**: {}", format_human_date(Some(created))));
        any_detail = true;
    }
    if let Some(last) = usage.last_usage.as_deref() {
        lines.push(format!("- **Last Analysis**: {}", format_human_date(Some(last))));
        any_detail = true;
    }
    if !any_detail {
        lines.push("- **Status**: Active".to_string());
    }

    if !plan.is_paid() {
        lines.push(String::new());
        lines.push(upgrade_prompt());
    }

    lines.join("\n")
}

/// Human-format an ISO-8601 date, falling back to the raw string when it
/// does not parse and to "N/A" when absent.
pub fn format_human_date(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "N/A".to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));

    match date {
        Ok(d) => format!("{} {}, {}", d.format("%B"), d.day(), d.year()),
        Err(_) => raw.to_string(),
    }
}

/// Whole days between `now` and the period end, computed in the period's
/// own timezone when the timestamp carries one.
pub fn days_remaining(period_end: &str, now: DateTime<Utc>) -> Option<String> {
    let remaining = if let Ok(end) = DateTime::parse_from_rfc3339(period_end) {
        end.signed_duration_since(now.with_timezone(&end.timezone()))
    } else if let Ok(date) = NaiveDate::parse_from_str(period_end, "%Y-%m-%d") {
        let end = date.and_hms_opt(23, 59, 59)?.and_utc();
        end.signed_duration_since(now)
    } else {
        return None;
    };

    if remaining.num_seconds() < 0 {
        Some("Current period has ended".to_string())
    } else if remaining.num_days() == 0 {
        Some("Last day of the current period".to_string())
    } else {
        Some(format!("{} days", remaining.num_days()))
    }
}
