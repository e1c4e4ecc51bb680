use thiserror::Error;

use crate::common::return_codes::ReturnCode;
use crate::domain::entities::EnvironmentStatus;
use crate::infrastructure::manager::ManagerError;

#[derive(Error, Debug)]
pub enum SumanError {
    #[error("Login to SUSE Manager {host} failed [{}]: {source}", ReturnCode::ErrLoginSuseManager.as_str())]
    AuthenticationError {
        host: String,
        #[source]
        source: ManagerError,
    },

    #[error("{field} is mandatory")]
    MandatoryInputError { field: String },

    #[error("{kind} {label} does not exist")]
    NotFoundError { kind: String, label: String },

    #[error("{}", predecessor_message(.environment, .status))]
    PredecessorNotReadyError {
        environment: String,
        status: EnvironmentStatus,
    },

    #[error("SUSE Manager call {operation} failed: {source}")]
    ManagerCallError {
        operation: String,
        #[source]
        source: ManagerError,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Operation timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

fn predecessor_message(environment: &str, status: &EnvironmentStatus) -> String {
    if status.is_in_progress() {
        format!("previous environment {} still being build", environment)
    } else {
        format!(
            "previous environment {} has not been built yet, build it first",
            environment
        )
    }
}

impl SumanError {
    pub fn authentication_error(host: impl Into<String>, source: ManagerError) -> Self {
        Self::AuthenticationError {
            host: host.into(),
            source,
        }
    }

    pub fn mandatory_input(field: impl Into<String>) -> Self {
        Self::MandatoryInputError {
            field: field.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self::NotFoundError {
            kind: kind.into(),
            label: label.into(),
        }
    }

    pub fn predecessor_not_ready(environment: impl Into<String>, status: EnvironmentStatus) -> Self {
        Self::PredecessorNotReadyError {
            environment: environment.into(),
            status,
        }
    }

    pub fn manager_call(operation: impl Into<String>, source: ManagerError) -> Self {
        Self::ManagerCallError {
            operation: operation.into(),
            source,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Return code reported to the shell for this error
    pub fn return_code(&self) -> ReturnCode {
        match self {
            Self::AuthenticationError { .. } => ReturnCode::ErrLoginSuseManager,
            Self::MandatoryInputError { .. } => ReturnCode::ErrMandatoryInput,
            Self::NotFoundError { .. } => ReturnCode::ErrNotFound,
            Self::PredecessorNotReadyError { .. } => ReturnCode::ErrPredecessorNotReady,
            Self::ManagerCallError { .. } => ReturnCode::ErrSuseManagerCall,
            Self::ConfigError { .. } => ReturnCode::ErrLoadConfig,
            Self::Timeout { .. } => ReturnCode::ErrTimeout,
            Self::InternalError { .. } => ReturnCode::ErrGeneric,
        }
    }
}
