use clap::Parser;

/// The action is driven by environment inputs; the flags exist for local
/// runs and debugging.
#[derive(Parser, Debug, Default)]
#[clap(name = "stride-gpt-action")]
#[clap(about = "STRIDE threat modeling for pull requests and issues", long_about = None)]
pub struct Cli {
    /// Override TRIGGER_MODE (comment, pr, manual)
    #[clap(long)]
    pub trigger_mode: Option<String>,

    /// Override STRIDE_API_URL
    #[clap(long)]
    pub api_url: Option<String>,
}
