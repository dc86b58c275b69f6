use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::constants::TRIGGER_MENTION;
use crate::enums::trigger_mode::TriggerMode;
use crate::enums::workflow::Workflow;
use crate::errors::{ActionError, ActionResult};

// Mention followed by one alphanumeric-plus-underscore token, matched over
// the lowercased body.
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@stride-gpt\s+(\w+)").expect("valid command regex"));

pub struct TriggerClassifier;

impl TriggerClassifier {
    /// Classify an event payload under the given trigger mode. `Ok(None)` is
    /// the deliberate skip: a comment event that never mentions the bot.
    pub fn classify(context: &Value, mode: TriggerMode) -> ActionResult<Option<Workflow>> {
        match mode {
            TriggerMode::Comment => Self::classify_comment(context),
            TriggerMode::Pr => {
                let pr_number = context["event"]["pull_request"]["number"]
                    .as_u64()
                    .ok_or_else(|| {
                        ActionError::config_error("Could not determine PR number from context")
                    })?;
                Ok(Some(Workflow::PrAutomatic { pr_number }))
            }
            TriggerMode::Manual => Ok(Some(Workflow::ManualRepository)),
        }
    }

    fn classify_comment(context: &Value) -> ActionResult<Option<Workflow>> {
        if context["event_name"].as_str() != Some("issue_comment") {
            return Err(ActionError::config_error(
                "Comment trigger requires issue_comment event",
            ));
        }

        let body = context["event"]["comment"]["body"].as_str().unwrap_or("");

        let number = context["event"]["issue"]["number"]
            .as_u64()
            .ok_or_else(|| ActionError::config_error("Could not determine issue/PR number"))?;

        // Case-sensitive presence check, independent of command parsing
        if !body.contains(TRIGGER_MENTION) {
            return Ok(None);
        }

        let is_pull_request = !context["event"]["issue"]["pull_request"].is_null();

        let command = Self::parse_command(body)
            .unwrap_or_else(|| "analyze".to_string());

        Ok(Some(Workflow::Comment { number, is_pull_request, command }))
    }

    /// Case-insensitive command parse. A bare mention defaults to `analyze`;
    /// no mention at all yields no command.
    pub fn parse_command(body: &str) -> Option<String> {
        let lowered = body.to_lowercase();

        if let Some(caps) = COMMAND_RE.captures(&lowered) {
            return Some(caps[1].to_string());
        }

        if lowered.contains(TRIGGER_MENTION) {
            return Some("analyze".to_string());
        }

        None
    }
}
