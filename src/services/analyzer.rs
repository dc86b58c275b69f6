use std::sync::Arc;

use crate::errors::{ActionError, ActionResult};
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::traits::analysis_api::AnalysisApi;
use crate::traits::source_control::SourceControl;

/// Coordinates one analysis: gathers input from GitHub, builds the request,
/// invokes the gateway, and normalizes the outcome.
pub struct ActionAnalyzer {
    github: Arc<dyn SourceControl>,
    stride: Arc<dyn AnalysisApi>,
    repo_name: String,
    github_token: String,
}

impl ActionAnalyzer {
    pub fn new(
        github: Arc<dyn SourceControl>,
        stride: Arc<dyn AnalysisApi>,
        repo_name: &str,
        github_token: &str,
    ) -> Self {
        Self {
            github,
            stride,
            repo_name: repo_name.to_string(),
            github_token: github_token.to_string(),
        }
    }

    /// Analyze the changed files of a pull request.
    pub async fn analyze_pr(&self, pr_number: u64) -> ActionResult<AnalysisResult> {
        self.ensure_public_repository().await?;

        let files = self.github.list_changed_files(pr_number).await?;
        if files.is_empty() {
            log::info!("📭 PR #{} has no analyzable files, skipping API call", pr_number);
            return Ok(AnalysisResult::empty());
        }

        log::info!("🔍 Analyzing {} changed files in PR #{}", files.len(), pr_number);
        let request = AnalysisRequest::changed_files(&self.repo_name, &self.github_token, pr_number);
        self.submit(request).await
    }

    /// Threat-model a proposed feature from an issue description.
    pub async fn analyze_feature_description(&self, issue_number: u64) -> ActionResult<AnalysisResult> {
        self.ensure_public_repository().await?;

        let description = self.github.get_issue_body(issue_number).await?;
        if description.trim().is_empty() {
            log::info!("📭 Issue #{} has no description, skipping API call", issue_number);
            return Ok(AnalysisResult::empty());
        }

        log::info!("🔍 Threat modeling feature described in issue #{}", issue_number);
        let request = AnalysisRequest::feature_description(
            &self.repo_name,
            &self.github_token,
            issue_number,
            &description,
        );
        self.submit(request).await
    }

    /// Analyze the entire repository. No input precondition; always calls
    /// the gateway.
    pub async fn analyze_repository(&self) -> ActionResult<AnalysisResult> {
        self.ensure_public_repository().await?;

        log::info!("🔍 Analyzing full repository {}", self.repo_name);
        let request = AnalysisRequest::full_repository(&self.repo_name, &self.github_token);
        self.submit(request).await
    }

    /// Free tier only supports public repositories; the check happens before
    /// any gateway traffic.
    async fn ensure_public_repository(&self) -> ActionResult<()> {
        if self.github.is_public_repository().await? {
            Ok(())
        } else {
            Err(ActionError::plan_restriction(
                "Private repositories require a paid STRIDE-GPT plan. \
                 Visit https://stridegpt.ai/pricing to upgrade.",
            ))
        }
    }

    /// `UsageLimitExceeded` is the one recoverable gateway failure: it turns
    /// into a sentinel result so the run still posts a useful comment. All
    /// other kinds propagate.
    async fn submit(&self, request: AnalysisRequest) -> ActionResult<AnalysisResult> {
        match self.stride.submit_analysis(&request).await {
            Ok(response) => Ok(AnalysisResult::from_response(response)),
            Err(ActionError::UsageLimitExceeded { .. }) => {
                log::warn!("🛑 Monthly analysis limit reached");
                Ok(AnalysisResult::limit_reached())
            }
            Err(e) => Err(e),
        }
    }
}
