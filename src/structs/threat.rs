use serde::Deserialize;
use serde_json::Value;

use crate::enums::severity::Severity;

/// One threat record from the analysis API. The remote schema is not
/// contractually field-complete, so every field is optional and every
/// accessor supplies a literal fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Threat {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    // Number or string on the wire, depending on API version
    #[serde(default)]
    pub line: Option<Value>,
    #[serde(default)]
    pub affected_files: Vec<String>,
    #[serde(default)]
    pub dread_score: Option<f64>,
}

impl Threat {
    pub fn severity(&self) -> Severity {
        Severity::parse(self.severity.as_deref())
    }

    pub fn title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "Unknown Threat",
        }
    }

    pub fn category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => "Unknown",
        }
    }

    pub fn description(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No description provided",
        }
    }

    /// File location, suppressed when the API sent nothing usable.
    pub fn file(&self) -> Option<&str> {
        match self.file.as_deref() {
            Some(f) if !f.is_empty() && f != "Unknown" => Some(f),
            _ => None,
        }
    }

    /// Line label, suppressed when absent or the "?" placeholder.
    pub fn line_label(&self) -> Option<String> {
        match &self.line {
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::String(s)) if !s.is_empty() && s != "?" => Some(s.clone()),
            _ => None,
        }
    }
}
