use async_trait::async_trait;

use crate::errors::ActionResult;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analyze_response::AnalyzeResponse;
use crate::structs::usage_snapshot::UsageSnapshot;

/// Remote analysis API boundary, implemented by the STRIDE gateway.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn submit_analysis(&self, request: &AnalysisRequest) -> ActionResult<AnalyzeResponse>;

    async fn fetch_usage(&self) -> ActionResult<UsageSnapshot>;

    /// Diagnostic probe only; never on the primary request path.
    async fn check_health(&self) -> bool;
}
