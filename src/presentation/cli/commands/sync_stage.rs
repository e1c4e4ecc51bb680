use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::sync_stage::{
    SyncAction, SyncStageConfig, SyncStageResult, SyncStageUseCase,
};
use crate::domain::entities::InputData;
use crate::infrastructure::manager::ManagerProxy;

/// Handler for the sync-stage command
pub struct SyncStageCommand {
    pub input: InputData,
    pub config: SyncStageConfig,
    pub verbose: bool,
}

impl SyncStageCommand {
    pub fn new(input: InputData, config: SyncStageConfig, verbose: bool) -> Self {
        Self {
            input,
            config,
            verbose,
        }
    }

    /// Execute the sync-stage command
    pub async fn execute(&self, proxy: Arc<dyn ManagerProxy>, host: &str) -> Result<()> {
        let use_case =
            SyncStageUseCase::new(proxy, host, self.input.clone(), self.config.clone());

        println!(
            "{} Synchronizing environment {} of project {}...",
            "::".blue().bold(),
            self.input.environment.bold(),
            self.input.project.bold()
        );

        let result = use_case.execute().await?;
        self.print_result(&result);
        Ok(())
    }

    fn print_result(&self, result: &SyncStageResult) {
        let started = match &result.action {
            SyncAction::Build => "Build".to_string(),
            SyncAction::Promote { from } => format!("Promotion from {}", from),
        };

        match &result.final_status {
            Some(status) => println!(
                "{} {} finished, environment {} is {}",
                "✓".green().bold(),
                started,
                self.input.environment.bold(),
                status.to_string().green()
            ),
            None => println!(
                "{} {} started for environment {}",
                "✓".green().bold(),
                started,
                self.input.environment.bold()
            ),
        }

        if self.verbose && result.polls > 0 {
            println!("  Status checks: {}", result.polls);
        }
    }
}
