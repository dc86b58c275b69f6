pub mod analysis_api;
pub mod source_control;
