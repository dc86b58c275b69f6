/// Canonical threat severity buckets. The remote API sends free-text
/// severities; anything unrecognized lands in `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("critical") => Self::Critical,
            Some("high") => Self::High,
            Some("low") => Self::Low,
            Some("info") => Self::Info,
            // "medium", missing, and unknown strings all rank as medium
            _ => Self::Medium,
        }
    }

    /// Sort rank: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Info => 4,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Critical => "🔴",
            Self::High => "🟠",
            Self::Medium => "🟡",
            Self::Low => "🟢",
            Self::Info => "🔵",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Info => "INFO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_severities_case_insensitively() {
        assert_eq!(Severity::parse(Some("CRITICAL")), Severity::Critical);
        assert_eq!(Severity::parse(Some("High")), Severity::High);
        assert_eq!(Severity::parse(Some("medium")), Severity::Medium);
        assert_eq!(Severity::parse(Some(" low ")), Severity::Low);
        assert_eq!(Severity::parse(Some("info")), Severity::Info);
    }

    #[test]
    fn unknown_and_missing_default_to_medium() {
        assert_eq!(Severity::parse(Some("catastrophic")), Severity::Medium);
        assert_eq!(Severity::parse(Some("")), Severity::Medium);
        assert_eq!(Severity::parse(None), Severity::Medium);
    }

    #[test]
    fn rank_orders_critical_first() {
        let mut severities = vec![Severity::Info, Severity::Low, Severity::Critical, Severity::Medium, Severity::High];
        severities.sort_by_key(|s| s.rank());
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::High, Severity::Medium, Severity::Low, Severity::Info]
        );
    }
}
