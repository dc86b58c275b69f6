use std::path::PathBuf;

use serde_json::Value;

use crate::config::constants::{DEFAULT_GITHUB_API_URL, DEFAULT_STRIDE_API_URL};
use crate::enums::trigger_mode::TriggerMode;
use crate::errors::{ActionError, ActionResult};
use crate::structs::cli::Cli;

/// Process-wide configuration, built once at startup from the action's
/// environment inputs and passed by reference into the services. No ambient
/// env lookups happen past this point.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub stride_api_key: String,
    pub github_token: String,
    pub repository: String,
    pub trigger_mode: TriggerMode,
    /// Serialized event-context blob: `{event_name, repository, event}`.
    pub context: Value,
    pub stride_api_url: String,
    pub github_api_url: String,
    pub output_path: Option<PathBuf>,
}

impl ActionConfig {
    pub fn from_env(cli: &Cli) -> ActionResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cli)
    }

    /// Environment access goes through `lookup` so tests can inject values.
    pub fn from_lookup<F>(lookup: F, cli: &Cli) -> ActionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stride_api_key = lookup("STRIDE_API_KEY").filter(|v| !v.is_empty()).ok_or_else(|| {
            ActionError::config_error(
                "STRIDE_API_KEY is required. Get your free key at https://stridegpt.ai",
            )
        })?;

        let github_token = lookup("GITHUB_TOKEN")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ActionError::config_error("GITHUB_TOKEN is required"))?;

        let repository = lookup("GITHUB_REPOSITORY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ActionError::config_error("GITHUB_REPOSITORY not found in environment"))?;

        let mode_str = cli
            .trigger_mode
            .clone()
            .or_else(|| lookup("TRIGGER_MODE"))
            .unwrap_or_else(|| "comment".to_string());
        let trigger_mode: TriggerMode = mode_str.parse()?;

        let context = Self::load_context(&lookup, &repository)?;

        let stride_api_url = cli
            .api_url
            .clone()
            .or_else(|| lookup("STRIDE_API_URL"))
            .unwrap_or_else(|| DEFAULT_STRIDE_API_URL.to_string());

        let github_api_url =
            lookup("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let output_path = lookup("GITHUB_OUTPUT").map(PathBuf::from);

        Ok(Self {
            stride_api_key,
            github_token,
            repository,
            trigger_mode,
            context,
            stride_api_url,
            github_api_url,
            output_path,
        })
    }

    /// Prefer the serialized GITHUB_CONTEXT blob; otherwise assemble one
    /// from GITHUB_EVENT_NAME and the event file at GITHUB_EVENT_PATH.
    fn load_context<F>(lookup: &F, repository: &str) -> ActionResult<Value>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("GITHUB_CONTEXT") {
            return Ok(serde_json::from_str(&raw)?);
        }

        let event_name = lookup("GITHUB_EVENT_NAME").unwrap_or_default();
        let event = match lookup("GITHUB_EVENT_PATH") {
            Some(path) if std::path::Path::new(&path).exists() => {
                let raw = std::fs::read_to_string(&path)?;
                serde_json::from_str(&raw)?
            }
            _ => Value::Object(Default::default()),
        };

        Ok(serde_json::json!({
            "event_name": event_name,
            "repository": repository,
            "event": event,
        }))
    }
}
