use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::constants::USER_AGENT;
use crate::errors::{ActionError, ActionResult};
use crate::structs::changed_file::ChangedFile;
use crate::traits::source_control::SourceControl;

const FILES_PER_PAGE: usize = 100;

/// GitHub REST v3 client for the handful of calls the action needs.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str, repo: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            repo: repo.to_string(),
        }
    }

    async fn get(&self, operation: &str, url: &str) -> ActionResult<Value> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| ActionError::github_error(operation, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ActionError::github_error(
                operation,
                &format!("HTTP {}: {}", status.as_u16(), body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ActionError::github_error(operation, &e.to_string()))
    }

    async fn post(&self, operation: &str, url: &str, body: &Value) -> ActionResult<Value> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await
            .map_err(|e| ActionError::github_error(operation, &e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ActionError::github_error(
                operation,
                &format!("HTTP {}: {}", status.as_u16(), text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ActionError::github_error(operation, &e.to_string()))
    }

    /// Both PR threads and plain issues take comments on the issues
    /// endpoint; only the URL the caller follows afterwards differs.
    async fn create_comment(&self, number: u64, body: &str) -> ActionResult<String> {
        let url = format!("{}/repos/{}/issues/{}/comments", self.api_url, self.repo, number);
        let created = self
            .post("create comment", &url, &json!({ "body": body }))
            .await?;

        created["html_url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ActionError::github_error("create comment", "response missing html_url"))
    }
}

#[async_trait]
impl SourceControl for GitHubClient {
    async fn is_public_repository(&self) -> ActionResult<bool> {
        let url = format!("{}/repos/{}", self.api_url, self.repo);
        let repo = self.get("fetch repository", &url).await?;
        Ok(!repo["private"].as_bool().unwrap_or(false))
    }

    async fn list_changed_files(&self, pr_number: u64) -> ActionResult<Vec<ChangedFile>> {
        let mut files: Vec<ChangedFile> = Vec::new();
        let mut page = 1usize;

        loop {
            let url = format!(
                "{}/repos/{}/pulls/{}/files?per_page={}&page={}",
                self.api_url, self.repo, pr_number, FILES_PER_PAGE, page
            );
            let batch = self.get("list PR files", &url).await?;
            let batch: Vec<ChangedFile> = serde_json::from_value(batch)?;
            let batch_len = batch.len();

            files.extend(batch.into_iter().filter(|f| f.status != "removed"));

            if batch_len < FILES_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(files)
    }

    async fn get_issue_body(&self, issue_number: u64) -> ActionResult<String> {
        let url = format!("{}/repos/{}/issues/{}", self.api_url, self.repo, issue_number);
        let issue = self.get("fetch issue", &url).await?;
        Ok(issue["body"].as_str().unwrap_or_default().to_string())
    }

    async fn post_pr_comment(&self, pr_number: u64, body: &str) -> ActionResult<String> {
        self.create_comment(pr_number, body).await
    }

    async fn post_issue_comment(&self, issue_number: u64, body: &str) -> ActionResult<String> {
        self.create_comment(issue_number, body).await
    }
}
