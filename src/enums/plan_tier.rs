/// Subscription tier reported by the usage endpoint. Free-text on the wire;
/// anything outside the canonical set is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTier {
    Free,
    Starter,
    Pro,
    Enterprise,
    Unknown,
}

impl PlanTier {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("free") => Self::Free,
            Some("starter") => Self::Starter,
            Some("pro") => Self::Pro,
            Some("enterprise") => Self::Enterprise,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
            Self::Unknown => "Unknown",
        }
    }

    /// Paid tiers get the full report wording; unknown plans are rendered
    /// with the free-tier wording so nobody sees entitlements they may not
    /// have.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Starter | Self::Pro | Self::Enterprise)
    }

    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Free | Self::Unknown => &[
                "50 analyses per month",
                "5 threats maximum per analysis",
                "Public repositories only",
                "Basic severity ratings",
            ],
            Self::Starter => &[
                "500 analyses per month",
                "Unlimited threats per analysis",
                "DREAD risk scoring",
                "Private repository support",
            ],
            Self::Pro => &[
                "2,500 analyses per month",
                "Unlimited threats per analysis",
                "DREAD risk scoring",
                "Attack tree visualization",
                "Private repository support",
                "API access",
            ],
            Self::Enterprise => &[
                "Unlimited analyses",
                "Unlimited threats per analysis",
                "DREAD risk scoring",
                "Attack tree visualization",
                "Private repository support",
                "API access",
                "SLA support",
            ],
        }
    }
}
