use std::fmt;

use serde::Serialize;

use crate::helpers::secrets::mask_secret;

/// Outbound request to `POST /api/v1/analyze`. The repository URL is
/// normalized exactly once, here at construction; render code never touches
/// it again.
#[derive(Clone, Serialize)]
pub struct AnalysisRequest {
    pub repository: String,
    pub github_token: String,
    pub analysis_type: AnalysisType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    ChangedFiles,
    FeatureDescription,
    FullRepository,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOptions {
    pub feature_description: String,
    pub issue_number: u64,
}

impl AnalysisRequest {
    pub fn changed_files(repo_name: &str, github_token: &str, pr_number: u64) -> Self {
        Self {
            repository: normalize_repository_url(repo_name),
            github_token: github_token.to_string(),
            analysis_type: AnalysisType::ChangedFiles,
            pr_number: Some(pr_number),
            options: None,
        }
    }

    pub fn feature_description(
        repo_name: &str,
        github_token: &str,
        issue_number: u64,
        description: &str,
    ) -> Self {
        Self {
            repository: normalize_repository_url(repo_name),
            github_token: github_token.to_string(),
            analysis_type: AnalysisType::FeatureDescription,
            pr_number: None,
            options: Some(AnalysisOptions {
                feature_description: description.to_string(),
                issue_number,
            }),
        }
    }

    pub fn full_repository(repo_name: &str, github_token: &str) -> Self {
        Self {
            repository: normalize_repository_url(repo_name),
            github_token: github_token.to_string(),
            analysis_type: AnalysisType::FullRepository,
            pr_number: None,
            options: None,
        }
    }
}

// Manual Debug keeps the access token out of logs.
impl fmt::Debug for AnalysisRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisRequest")
            .field("repository", &self.repository)
            .field("github_token", &mask_secret(&self.github_token))
            .field("analysis_type", &self.analysis_type)
            .field("pr_number", &self.pr_number)
            .field("options", &self.options)
            .finish()
    }
}

/// Bare `owner/name` becomes an absolute GitHub URL; already-absolute URLs
/// pass through unchanged.
pub fn normalize_repository_url(repo_name: &str) -> String {
    if repo_name.starts_with("https://") {
        repo_name.to_string()
    } else {
        format!("https://github.com/{}", repo_name)
    }
}
