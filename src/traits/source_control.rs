use async_trait::async_trait;

use crate::errors::ActionResult;
use crate::structs::changed_file::ChangedFile;

/// Source-control host boundary. The production implementation is the
/// GitHub REST client; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn is_public_repository(&self) -> ActionResult<bool>;

    /// Changed files for a PR, with removed entries already excluded.
    async fn list_changed_files(&self, pr_number: u64) -> ActionResult<Vec<ChangedFile>>;

    /// Issue body, or an empty string when the issue has none.
    async fn get_issue_body(&self, issue_number: u64) -> ActionResult<String>;

    /// Post to a PR conversation thread. Returns the comment URL.
    async fn post_pr_comment(&self, pr_number: u64, body: &str) -> ActionResult<String>;

    /// Post to an issue thread. Returns the comment URL.
    async fn post_issue_comment(&self, issue_number: u64, body: &str) -> ActionResult<String>;
}
