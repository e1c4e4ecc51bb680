use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::create_software_project::{
    CreateProjectResult, CreateSoftwareProjectUseCase,
};
use crate::domain::entities::InputData;
use crate::infrastructure::manager::ManagerProxy;

/// Handler for the create-project command
pub struct CreateProjectCommand {
    pub input: InputData,
    pub verbose: bool,
}

impl CreateProjectCommand {
    pub fn new(input: InputData, verbose: bool) -> Self {
        Self { input, verbose }
    }

    /// Execute the create-project command
    pub async fn execute(&self, proxy: Arc<dyn ManagerProxy>, host: &str) -> Result<()> {
        let use_case = CreateSoftwareProjectUseCase::new(proxy, host, self.input.clone());

        println!(
            "{} Reconciling project {}...",
            "::".blue().bold(),
            self.input.project.bold()
        );

        let result = use_case.execute().await?;
        self.print_result(&result);
        Ok(())
    }

    fn print_result(&self, result: &CreateProjectResult) {
        if result.project_created {
            println!(
                "{} Project {} created with {} environment(s)",
                "✓".green().bold(),
                self.input.project.bold(),
                result.environments_created.len()
            );
        } else {
            println!(
                "{} Project {} already exists, channels updated",
                "✓".green().bold(),
                self.input.project.bold()
            );
        }

        if self.verbose {
            if !result.environments_created.is_empty() {
                println!("  Environments: {}", result.environments_created.join(" -> "));
            }
            for channel in &result.channels.attached {
                println!("  {} {}", "+".green(), channel);
            }
            for channel in &result.channels.detached {
                println!("  {} {}", "-".red(), channel);
            }
        }

        if !result.channels.skipped.is_empty() {
            println!(
                "{} Channels not found on SUSE Manager: {}",
                "⚠".yellow().bold(),
                result.channels.skipped.join(", ")
            );
        }
    }
}
