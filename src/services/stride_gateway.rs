use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::constants::{analyze_timeout, health_timeout, usage_timeout, USER_AGENT};
use crate::errors::{ActionError, ActionResult};
use crate::helpers::retry::RetryPolicy;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analyze_response::AnalyzeResponse;
use crate::structs::usage_snapshot::UsageSnapshot;
use crate::traits::analysis_api::AnalysisApi;

/// Thin client over the STRIDE-GPT API. Owns the retry policy, the
/// per-endpoint timeouts, and the status-code-to-error-kind mapping.
pub struct StrideGateway {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl StrideGateway {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    async fn post_analyze(&self, request: &AnalysisRequest) -> ActionResult<AnalyzeResponse> {
        let url = format!("{}/api/v1/analyze", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", USER_AGENT)
            .json(request)
            .timeout(analyze_timeout())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_error_status(status.as_u16(), &body));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AnalysisApi for StrideGateway {
    async fn submit_analysis(&self, request: &AnalysisRequest) -> ActionResult<AnalyzeResponse> {
        log::debug!("📤 Submitting analysis request: {:?}", request);
        self.retry
            .run("STRIDE analysis request", || self.post_analyze(request))
            .await
    }

    async fn fetch_usage(&self) -> ActionResult<UsageSnapshot> {
        let url = format!("{}/api/v1/usage", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", USER_AGENT)
            .timeout(usage_timeout())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ActionError::Gateway { status: status.as_u16(), body });
        }

        let body = response.text().await.map_err(map_transport_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);

        match self
            .client
            .get(&url)
            .timeout(health_timeout())
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(_) => false,
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ActionError {
    if error.is_timeout() {
        ActionError::Timeout {
            message: "Analysis request timed out. Large repositories may take longer to analyze. \
                      Consider using a smaller repository or contact support if this persists."
                .to_string(),
        }
    } else {
        ActionError::Network { reason: error.to_string() }
    }
}

/// Map a received error status onto a typed error kind. 402 is ambiguous on
/// the wire: a `detail` mentioning "private" means a plan restriction, any
/// other 402 means the monthly quota is gone.
pub fn map_error_status(status: u16, body: &str) -> ActionError {
    match status {
        402 => {
            let detail = extract_detail(body).unwrap_or_default();
            if detail.to_lowercase().contains("private") {
                ActionError::plan_restriction(
                    "Private repositories require a paid STRIDE-GPT plan. \
                     Visit https://stridegpt.ai/pricing to upgrade.",
                )
            } else {
                ActionError::usage_limit("Monthly limit reached. Please upgrade your plan.")
            }
        }
        403 => ActionError::Forbidden {
            message: extract_detail(body)
                .unwrap_or_else(|| "Invalid API key or insufficient permissions.".to_string()),
        },
        429 => ActionError::RateLimited,
        _ => ActionError::Gateway { status, body: body.to_string() },
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}
