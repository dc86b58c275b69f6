pub mod analyzer;
pub mod github_client;
pub mod reporter;
pub mod stride_gateway;
pub mod trigger_classifier;
