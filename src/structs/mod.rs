pub mod action_config;
pub mod analysis_request;
pub mod analysis_result;
pub mod analyze_response;
pub mod changed_file;
pub mod cli;
pub mod threat;
pub mod usage_snapshot;
