//! # suman - Content lifecycle automation for SUSE Manager
//!
//! `suman` is a command-line tool that drives the content lifecycle management
//! API of a SUSE Manager (Uyuni) server. It creates software projects with their
//! chain of environments, keeps the attached channels in shape, and builds or
//! promotes environments stage by stage.
//!
//! ## Features
//!
//! - **Project Creation**: Create a project, its environment chain and its initial channels in one go
//! - **Channel Maintenance**: Attach and detach channels on an existing project
//! - **Stage Synchronization**: Build the first environment or promote the next one
//! - **Build Waiting**: Optionally poll until the target environment is built
//!
//! ## Quick Start
//!
//! 1. Create a configuration file (`config.yaml`):
//!
//! ```yaml
//! Suman:
//!   Server: suma.example.com
//!   User: admin
//!   Password: secret
//! Log:
//!   Level: info
//! ```
//!
//! 2. Create a project with two environments:
//!
//! ```bash
//! suman create-project -p myproj -b sles15-sp5-pool-x86_64 -e dev,prod
//! ```
//!
//! 3. Build the first environment and promote the second:
//!
//! ```bash
//! suman sync-stage -p myproj -e dev --wait
//! suman sync-stage -p myproj -e prod
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Projects, environments, channels and operator input
//! - [`application`]: Use cases and the services they share
//! - [`infrastructure`]: SUSE Manager API client and configuration storage
//! - [`presentation`]: CLI interface and user interaction
//! - [`common`]: Error handling, return codes and logging
//!
//! ## Use Cases
//!
//! - [`application::use_cases::create_software_project`]: Create or update a software project
//! - [`application::use_cases::sync_stage`]: Build or promote an environment
//!
//! ## Error Handling
//!
//! - [`common::error::SumanError`]: Main error type, each variant maps to a process return code
//! - [`common::result::SumanResult`]: Type alias for `Result<T, SumanError>`
//! - [`common::return_codes::ReturnCode`]: Return codes reported to the operator
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use suman::application::use_cases::sync_stage::{SyncStageConfig, SyncStageUseCase};
//! use suman::domain::entities::{InputData, SumanConfig};
//! use suman::infrastructure::manager::HttpManagerProxy;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SumanConfig::new("suma.example.com", "admin", "secret");
//! let proxy = Arc::new(HttpManagerProxy::new(&config)?);
//!
//! let input = InputData::new("myproj").with_environment("dev").with_wait(true);
//! let use_case = SyncStageUseCase::new(proxy, &config.server, input, SyncStageConfig::default());
//! let result = use_case.execute().await?;
//!
//! println!("{} finished with {:?}", result.action, result.final_status);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::SumanError;
pub use crate::common::result::SumanResult as Result;
