use serde::Deserialize;

/// One file entry from the PR files listing. Entries with `status ==
/// "removed"` are dropped by the GitHub client before they get here.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub patch: Option<String>,
}
