use crate::domain::entities::{Channel, Environment, Project};
use crate::domain::value_objects::AuthContext;
use async_trait::async_trait;
use std::fmt;

/// Remote API of the SUSE Manager server, one method per API call
///
/// Lookups return `None` when the object does not exist on the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerProxy: Send + Sync {
    /// Log in with the configured credentials and return the session key
    async fn login(&self) -> Result<String, ManagerError>;

    /// Check whether a software channel exists
    async fn channel_exists(&self, auth: &AuthContext, label: &str) -> Result<bool, ManagerError>;

    /// List the child channels of a base channel
    async fn channel_list_children(
        &self,
        auth: &AuthContext,
        base_label: &str,
    ) -> Result<Vec<Channel>, ManagerError>;

    /// Look up a content lifecycle project
    async fn project_lookup(
        &self,
        auth: &AuthContext,
        project: &str,
    ) -> Result<Option<Project>, ManagerError>;

    /// Create a content lifecycle project
    async fn project_create(
        &self,
        auth: &AuthContext,
        label: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ManagerError>;

    /// Build the first environment of a project
    async fn project_build(&self, auth: &AuthContext, project: &str) -> Result<(), ManagerError>;

    /// Promote the content of `from_env` to its successor
    async fn project_promote(
        &self,
        auth: &AuthContext,
        project: &str,
        from_env: &str,
    ) -> Result<(), ManagerError>;

    /// Look up an environment of a project
    async fn environment_lookup(
        &self,
        auth: &AuthContext,
        project: &str,
        env: &str,
    ) -> Result<Option<Environment>, ManagerError>;

    /// Create an environment after `previous_env` (empty for the first stage)
    async fn environment_create(
        &self,
        auth: &AuthContext,
        project: &str,
        previous_env: &str,
        env_label: &str,
        env_name: &str,
        description: &str,
    ) -> Result<(), ManagerError>;

    /// Attach a source to a project
    async fn attach_source(
        &self,
        auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError>;

    /// Detach a source from a project
    async fn detach_source(
        &self,
        auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError>;
}

/// Kind of project source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Software channel
    Software,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Software => "software",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by a [`ManagerProxy`]
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("Authentication failed for user {user}: {message}")]
    AuthenticationFailed { user: String, message: String },

    #[error("Invalid server address: {server}")]
    InvalidServer { server: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("HTTP status {status} returned by {method}")]
    HttpStatus { method: String, status: u16 },

    #[error("API call {method} failed: {message}")]
    ApiFault { method: String, message: String },

    #[error("Invalid response from {method}: {message}")]
    InvalidResponse { method: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ManagerError {
    /// Create an API fault error
    pub fn api_fault(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiFault {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Whether the failure happened on the transport and may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NetworkError { .. })
    }
}
