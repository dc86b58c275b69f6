use std::str::FromStr;

use crate::errors::ActionError;

/// Which event source started the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Comment,
    Pr,
    Manual,
}

impl TriggerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Pr => "pr",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for TriggerMode {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(Self::Comment),
            "pr" => Ok(Self::Pr),
            "manual" => Ok(Self::Manual),
            other => Err(ActionError::config_error(&format!(
                "Unknown trigger mode: {} (expected comment, pr, or manual)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_modes() {
        assert_eq!("comment".parse::<TriggerMode>().unwrap(), TriggerMode::Comment);
        assert_eq!("pr".parse::<TriggerMode>().unwrap(), TriggerMode::Pr);
        assert_eq!("manual".parse::<TriggerMode>().unwrap(), TriggerMode::Manual);
    }

    #[test]
    fn rejects_unknown_modes_as_configuration_errors() {
        let err = "push".parse::<TriggerMode>().unwrap_err();
        assert!(matches!(err, ActionError::Configuration { .. }));
    }
}
