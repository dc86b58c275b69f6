use std::sync::Arc;

use crate::enums::workflow::Workflow;
use crate::errors::{ActionError, ActionResult};
use crate::helpers::outputs::write_outputs;
use crate::helpers::secrets::mask_secret;
use crate::services::analyzer::ActionAnalyzer;
use crate::services::github_client::GitHubClient;
use crate::services::reporter::{sorted_by_severity, CommentReporter};
use crate::services::stride_gateway::StrideGateway;
use crate::services::trigger_classifier::TriggerClassifier;
use crate::structs::action_config::ActionConfig;
use crate::structs::analysis_result::AnalysisResult;
use crate::traits::analysis_api::AnalysisApi;
use crate::traits::source_control::SourceControl;

/// Top-level driver for one action invocation: classify the trigger, run the
/// matching workflow, publish step outputs.
pub struct ActionRunner {
    config: ActionConfig,
    stride: Arc<dyn AnalysisApi>,
    analyzer: ActionAnalyzer,
    reporter: CommentReporter,
}

impl ActionRunner {
    pub fn new(config: ActionConfig) -> Self {
        let github: Arc<dyn SourceControl> = Arc::new(GitHubClient::new(
            &config.github_api_url,
            &config.github_token,
            &config.repository,
        ));
        let stride: Arc<dyn AnalysisApi> =
            Arc::new(StrideGateway::new(&config.stride_api_url, &config.stride_api_key));

        let analyzer = ActionAnalyzer::new(
            github.clone(),
            stride.clone(),
            &config.repository,
            &config.github_token,
        );
        let reporter = CommentReporter::new(github, stride.clone());

        Self { config, stride, analyzer, reporter }
    }

    pub async fn run(&self) -> ActionResult<()> {
        log::info!(
            "🛡️ STRIDE-GPT action starting for {} in {} mode",
            self.config.repository,
            self.config.trigger_mode.as_str()
        );
        log::debug!("🔑 Using API key {}", mask_secret(&self.config.stride_api_key));

        if !self.stride.check_health().await {
            log::warn!("⚠️ STRIDE API health check failed, continuing anyway");
        }

        let workflow = TriggerClassifier::classify(&self.config.context, self.config.trigger_mode)?;
        let Some(workflow) = workflow else {
            log::info!("💤 Comment does not mention @stride-gpt, nothing to do");
            return Ok(());
        };

        match workflow {
            Workflow::Comment { number, is_pull_request, command } => {
                self.run_comment(number, is_pull_request, &command).await
            }
            Workflow::PrAutomatic { pr_number } => self.run_analysis(pr_number, true).await,
            Workflow::ManualRepository => self.run_manual().await,
        }
    }

    async fn run_comment(&self, number: u64, is_pull_request: bool, command: &str) -> ActionResult<()> {
        log::info!("📨 Handling `{}` command on #{}", command, number);

        match command {
            "analyze" => self.run_analysis(number, is_pull_request).await,
            "status" => self.run_status(number, is_pull_request).await,
            "help" => {
                let url = self.reporter.post_help_comment(number, is_pull_request).await?;
                log::info!("💬 Posted help comment: {}", url);
                Ok(())
            }
            other => {
                // Unknown commands get a pointer to help but do not fail the
                // workflow run.
                log::warn!("❓ Unknown command: {}", other);
                let message = format!(
                    "Unknown command: `{}`. Use `@stride-gpt help` to see available commands.",
                    other
                );
                let url = self
                    .reporter
                    .post_error_comment(number, &message, is_pull_request)
                    .await?;
                log::info!("💬 Posted unknown-command comment: {}", url);
                Ok(())
            }
        }
    }

    /// Analyze a PR's changed files, or an issue's feature description, and
    /// post the report. Failures are reported back to the thread before they
    /// fail the run.
    async fn run_analysis(&self, number: u64, is_pull_request: bool) -> ActionResult<()> {
        let outcome = if is_pull_request {
            self.analyzer.analyze_pr(number).await
        } else {
            self.analyzer.analyze_feature_description(number).await
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => return self.report_failure(number, is_pull_request, e).await,
        };

        let url = self
            .reporter
            .post_analysis_comment(number, &result, is_pull_request)
            .await?;
        log::info!("💬 Posted analysis report: {}", url);

        self.publish_outputs(&result, Some(&url));
        println!(
            "::notice::STRIDE analysis complete: {} threats found",
            result.threat_count
        );
        Ok(())
    }

    async fn run_status(&self, number: u64, is_pull_request: bool) -> ActionResult<()> {
        let usage = match self.stride.fetch_usage().await {
            Ok(usage) => usage,
            Err(e) => return self.report_failure(number, is_pull_request, e).await,
        };

        let url = self
            .reporter
            .post_status_comment(number, &usage, is_pull_request)
            .await?;
        log::info!("💬 Posted usage status: {}", url);
        Ok(())
    }

    /// Manual mode has no thread to comment on; results go to the step log
    /// inside a collapsible group.
    async fn run_manual(&self) -> ActionResult<()> {
        let result = self.analyzer.analyze_repository().await?;

        println!("::group::STRIDE Security Analysis");
        println!("Repository: {}", self.config.repository);
        println!("Threats found: {}", result.threat_count);
        println!();

        for threat in sorted_by_severity(&result.threats) {
            let severity = threat.severity();
            println!("[{}] {} ({})", severity.label(), threat.title(), threat.category());
            if let Some(file) = threat.file() {
                match threat.line_label() {
                    Some(line) => println!("  Location: {}:{}", file, line),
                    None => println!("  Location: {}", file),
                }
            }
            if let Some(score) = threat.dread_score {
                println!("  DREAD score: {}/10", score);
            }
            if !threat.affected_files.is_empty() {
                println!("  Affected files: {}", threat.affected_files.join(", "));
            }
            println!("  {}", threat.description());
            println!();
        }

        if let Some(notice) = &result.limitation_notice {
            println!("Note: {}", notice);
        }
        for key in ["model_used", "analysis_time_ms", "plan"] {
            if let Some(value) = result.usage_info.get(key) {
                println!("{}: {}", key, value);
            }
        }
        println!("::endgroup::");

        self.publish_outputs(&result, None);
        println!(
            "::notice::STRIDE analysis complete: {} threats found",
            result.threat_count
        );
        Ok(())
    }

    /// Post the error back to the thread, then propagate it so the step
    /// still fails. A secondary posting failure is logged, not raised.
    async fn report_failure(
        &self,
        number: u64,
        is_pull_request: bool,
        error: ActionError,
    ) -> ActionResult<()> {
        log::error!("❌ Workflow failed: {}", error);
        if let Err(post_err) = self
            .reporter
            .post_error_comment(number, &error.to_string(), is_pull_request)
            .await
        {
            log::error!("❌ Could not post error comment: {}", post_err);
        }
        Err(error)
    }

    fn publish_outputs(&self, result: &AnalysisResult, report_url: Option<&str>) {
        let mut pairs = vec![("threat-count", result.threat_count.to_string())];
        if let Some(url) = report_url {
            pairs.push(("report-url", url.to_string()));
        }
        write_outputs(self.config.output_path.as_deref(), &pairs);
    }
}
