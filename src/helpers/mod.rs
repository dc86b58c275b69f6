pub mod outputs;
pub mod retry;
pub mod secrets;
