use clap::Parser;

use stride_gpt_action::errors::ActionResult;
use stride_gpt_action::structs::action_config::ActionConfig;
use stride_gpt_action::structs::cli::Cli;
use stride_gpt_action::workers::action_runner::ActionRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => {}
        Err(e) => {
            // Surface the failure as a workflow annotation before exiting
            println!("::error::{}", e);
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> ActionResult<()> {
    let config = ActionConfig::from_env(cli)?;
    ActionRunner::new(config).run().await
}
