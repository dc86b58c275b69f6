use thiserror::Error;

/// Closed error taxonomy for the action. Gateway failure kinds are plain
/// variants so callers can match exhaustively; the orchestrator recovers
/// exactly `UsageLimitExceeded` and nothing else.
#[derive(Debug, Error)]
pub enum ActionError {
    // Pre-flight errors: bad trigger mode, missing identifiers, missing env
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Private repository on the free tier
    #[error("{message}")]
    PlanRestriction { message: String },

    // Monthly analysis quota exhausted
    #[error("{message}")]
    UsageLimitExceeded { message: String },

    // Invalid API key or insufficient permissions
    #[error("{message}")]
    Forbidden { message: String },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    // Transport-level timeout on the analysis call
    #[error("{message}")]
    Timeout { message: String },

    // Any other non-2xx from the analysis API
    #[error("STRIDE API error (HTTP {status}): {body}")]
    Gateway { status: u16, body: String },

    // GitHub REST failures
    #[error("GitHub API error during {operation}: {reason}")]
    GitHub { operation: String, reason: String },

    // Transport-level connection failure, eligible for retry
    #[error("Network error: {reason}")]
    Network { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ActionError {
    pub fn config_error(message: &str) -> Self {
        Self::Configuration { message: message.to_string() }
    }

    pub fn github_error(operation: &str, reason: &str) -> Self {
        Self::GitHub {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn plan_restriction(message: &str) -> Self {
        Self::PlanRestriction { message: message.to_string() }
    }

    pub fn usage_limit(message: &str) -> Self {
        Self::UsageLimitExceeded { message: message.to_string() }
    }

    /// Transport-level failures are the only retryable kind. A received
    /// error status is final no matter how unhappy it is.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

/// Result type alias for action operations
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_transient() {
        assert!(ActionError::Network { reason: "reset".into() }.is_transient());
        assert!(ActionError::Timeout { message: "timed out".into() }.is_transient());
    }

    #[test]
    fn received_statuses_are_not_transient() {
        assert!(!ActionError::RateLimited.is_transient());
        assert!(!ActionError::Gateway { status: 500, body: "boom".into() }.is_transient());
        assert!(!ActionError::usage_limit("limit").is_transient());
        assert!(!ActionError::Forbidden { message: "nope".into() }.is_transient());
    }

    #[test]
    fn display_carries_the_user_message() {
        let err = ActionError::plan_restriction("Private repositories require a paid plan.");
        assert_eq!(err.to_string(), "Private repositories require a paid plan.");

        let err = ActionError::Gateway { status: 500, body: "internal".into() };
        assert_eq!(err.to_string(), "STRIDE API error (HTTP 500): internal");
    }
}
