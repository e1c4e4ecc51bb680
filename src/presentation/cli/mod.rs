pub mod commands;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::application::use_cases::sync_stage::SyncStageConfig;
use crate::common::error::SumanError;
use crate::common::logging::init_logging;
use crate::common::return_codes::ReturnCode;
use crate::domain::entities::{Config, InputData};
use crate::infrastructure::filesystem::config_store::ConfigStore;
use crate::infrastructure::manager::{HttpManagerProxy, ManagerProxy};

use commands::{CreateProjectCommand, SyncStageCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    " for ",
    env!("BUILD_TARGET"),
    ")"
);

/// suman - Content lifecycle automation for SUSE Manager
#[derive(Parser)]
#[command(name = "suman")]
#[command(about = "Manage content lifecycle projects on SUSE Manager")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to config.yaml)
    #[arg(short, long, global = true, env = "SUMAN_CONFIG")]
    pub config: Option<String>,

    /// SUSE Manager password, overrides the configuration file
    #[arg(long, global = true, env = "SUMAN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a software project, or add/delete channels of an existing one
    CreateProject {
        /// Project label
        #[arg(short, long, default_value = "")]
        project: String,

        /// Base channel label
        #[arg(short, long, default_value = "")]
        base_channel: String,

        /// Comma-separated list of environments, in promotion order
        #[arg(short, long, default_value = "")]
        environment: String,

        /// Comma-separated list of channels to attach
        #[arg(short, long, default_value = "")]
        add_channel: String,

        /// Comma-separated list of channels to detach
        #[arg(short, long, default_value = "")]
        delete_channel: String,

        /// Project description (defaults to the project label)
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Build the first environment or promote an environment from its predecessor
    SyncStage {
        /// Project label
        #[arg(short, long, default_value = "")]
        project: String,

        /// Environment to build or promote into
        #[arg(short, long, default_value = "")]
        environment: String,

        /// Wait until the environment is built
        #[arg(short, long)]
        wait: bool,

        /// Seconds between status checks while waiting
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: u64,

        /// Give up waiting after this many seconds
        #[arg(long)]
        wait_timeout: Option<u64>,
    },
}

impl Commands {
    /// Operator input for the use case
    pub fn input_data(&self) -> InputData {
        match self {
            Commands::CreateProject {
                project,
                base_channel,
                environment,
                add_channel,
                delete_channel,
                description,
            } => InputData::new(project.clone())
                .with_base_channel(base_channel.clone())
                .with_environment(environment.clone())
                .with_add_channel(add_channel.clone())
                .with_delete_channel(delete_channel.clone())
                .with_description(description.clone()),
            Commands::SyncStage {
                project,
                environment,
                wait,
                ..
            } => InputData::new(project.clone())
                .with_environment(environment.clone())
                .with_wait(*wait),
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command and return the process return code
    pub async fn run(self) -> ReturnCode {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(()) => ReturnCode::Ok,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                e.downcast_ref::<SumanError>()
                    .map(SumanError::return_code)
                    .unwrap_or(ReturnCode::ErrGeneric)
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        let config = self.load_config().await?;
        init_logging(&config.log, self.cli.verbose)?;

        let proxy: Arc<dyn ManagerProxy> = Arc::new(
            HttpManagerProxy::new(&config.suman).map_err(|e| {
                SumanError::config_error_with_source("Invalid SUSE Manager settings", e)
            })?,
        );
        let host = config.suman.server.as_str();
        let input = self.cli.command.input_data();

        let result = match &self.cli.command {
            Commands::CreateProject { .. } => {
                CreateProjectCommand::new(input, self.cli.verbose)
                    .execute(proxy, host)
                    .await
            }
            Commands::SyncStage {
                poll_interval,
                wait_timeout,
                ..
            } => {
                let stage_config = SyncStageConfig::default()
                    .with_poll_interval(Duration::from_secs(*poll_interval))
                    .with_wait_timeout(wait_timeout.map(Duration::from_secs));
                SyncStageCommand::new(input, stage_config, self.cli.verbose)
                    .execute(proxy, host)
                    .await
            }
        };

        // Without a log file the failure is already printed by `run`
        if config.log.file.is_some() {
            if let Err(e) = &result {
                tracing::error!("{}", e);
            }
        }
        result
    }

    /// Load the configuration file named on the command line
    async fn load_config(&self) -> Result<Config, SumanError> {
        let path = ConfigStore::resolve_path(self.cli.config.as_deref());
        let config = ConfigStore::new()
            .with_password_override(self.cli.password.clone())
            .read_config(&path)
            .await?;
        Ok(config)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
