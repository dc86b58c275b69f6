pub mod plan_tier;
pub mod severity;
pub mod trigger_mode;
pub mod usage_trend;
pub mod workflow;
