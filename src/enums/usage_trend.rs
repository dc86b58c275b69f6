/// Direction of recent usage reported by the usage endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsageTrend {
    Up,
    Down,
    #[default]
    Stable,
}

impl UsageTrend {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("up") => Self::Up,
            Some("down") => Self::Down,
            _ => Self::Stable,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
            Self::Stable => "➡️",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "Increasing",
            Self::Down => "Decreasing",
            Self::Stable => "Stable",
        }
    }
}
