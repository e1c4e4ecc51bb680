//! SUSE Manager JSON over HTTP API client.
//!
//! Every API method lives below `<server>/rhn/manager/api/` and answers with
//! the envelope `{"success": bool, "result": ..., "message": ...}`. The session
//! is carried by the `pxt-session-cookie` cookie returned from `auth/login`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::manager_interface::{ManagerError, ManagerProxy, SourceType};
use crate::domain::entities::{Channel, Environment, Project, SumanConfig};
use crate::domain::value_objects::AuthContext;

const API_PATH: &str = "rhn/manager/api/";
const SESSION_COOKIE: &str = "pxt-session-cookie";
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    result: Option<T>,
    message: Option<String>,
    #[serde(default)]
    messages: Vec<String>,
}

impl<T> ApiResponse<T> {
    fn fault_message(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ if !self.messages.is_empty() => self.messages.join("; "),
            _ => "request was not successful".to_string(),
        }
    }
}

/// [`ManagerProxy`] implementation on top of reqwest
pub struct HttpManagerProxy {
    client: Client,
    base_url: Url,
    user: String,
    password: String,
    retry_count: u32,
    retry_delay: Duration,
}

impl HttpManagerProxy {
    /// Create a proxy from the connection settings
    pub fn new(config: &SumanConfig) -> Result<Self, ManagerError> {
        let client = Client::builder()
            .user_agent(concat!("suman/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(!config.ssl_certificate_check)
            .build()
            .map_err(|e| ManagerError::Internal {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: Self::api_base_url(&config.server)?,
            user: config.user.clone(),
            password: config.password.clone(),
            retry_count: config.retry_count,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// Override the pause between transport retries
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Root URL of the API
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the API root from a bare host name or a full URL
    pub fn api_base_url(server: &str) -> Result<Url, ManagerError> {
        let invalid = || ManagerError::InvalidServer {
            server: server.to_string(),
        };

        if server.trim().is_empty() {
            return Err(invalid());
        }

        let mut root = if server.contains("://") {
            server.to_string()
        } else {
            format!("https://{}", server)
        };
        if !root.ends_with('/') {
            root.push('/');
        }

        let root = Url::parse(&root).map_err(|_| invalid())?;
        if root.host_str().is_none() {
            return Err(invalid());
        }
        root.join(API_PATH).map_err(|_| invalid())
    }

    fn endpoint(&self, method: &str) -> Result<Url, ManagerError> {
        self.base_url
            .join(method)
            .map_err(|e| ManagerError::Internal {
                message: format!("Invalid API method {}: {}", method, e),
            })
    }

    fn session_cookie(auth: &AuthContext) -> String {
        format!("{}={}", SESSION_COOKIE, auth.session_key())
    }

    /// Send a request, retrying transport failures up to `retry_count` times
    async fn send<F>(&self, method: &str, build: F) -> Result<Response, ManagerError>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            match build().send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let error = Self::map_error(e);
                    if !error.is_transient() || attempt >= self.retry_count {
                        return Err(error);
                    }
                    attempt += 1;
                    warn!(
                        method,
                        attempt,
                        retry_count = self.retry_count,
                        "{}; retrying",
                        error
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    /// Unwrap the response envelope
    async fn decode<T: DeserializeOwned>(
        method: &str,
        response: Response,
    ) -> Result<T, ManagerError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ManagerError::HttpStatus {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ManagerError::invalid_response(method, e.to_string()))?;

        if !body.success {
            return Err(ManagerError::api_fault(method, body.fault_message()));
        }

        match body.result {
            Some(result) => Ok(result),
            // Mutating calls may answer without a result
            None => serde_json::from_value(Value::Null)
                .map_err(|_| ManagerError::invalid_response(method, "missing result")),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        auth: &AuthContext,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ManagerError> {
        let url = self.endpoint(method)?;
        let cookie = Self::session_cookie(auth);
        debug!(method, ?query, "GET");

        let response = self
            .send(method, || {
                self.client
                    .get(url.clone())
                    .header(COOKIE, cookie.as_str())
                    .query(query)
            })
            .await?;
        Self::decode(method, response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        auth: &AuthContext,
        method: &str,
        body: Value,
    ) -> Result<T, ManagerError> {
        let url = self.endpoint(method)?;
        let cookie = Self::session_cookie(auth);
        debug!(method, %body, "POST");

        let response = self
            .send(method, || {
                self.client
                    .post(url.clone())
                    .header(COOKIE, cookie.as_str())
                    .json(&body)
            })
            .await?;
        Self::decode(method, response).await
    }

    fn map_error(error: reqwest::Error) -> ManagerError {
        if error.is_timeout() {
            return ManagerError::Timeout {
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            };
        }
        ManagerError::NetworkError {
            message: error.to_string(),
        }
    }
}

/// Pick the live session key out of `Set-Cookie` header values
///
/// The server may also send an expired cookie with the same name.
pub fn extract_session_cookie<'a, I>(set_cookies: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    set_cookies.into_iter().find_map(|header| {
        let mut parts = header.split(';').map(str::trim);
        let (name, value) = parts.next()?.split_once('=')?;
        if name != SESSION_COOKIE || value.is_empty() {
            return None;
        }
        let expired = parts.any(|attr| attr.eq_ignore_ascii_case("Max-Age=0"));
        (!expired).then(|| value.to_string())
    })
}

#[async_trait]
impl ManagerProxy for HttpManagerProxy {
    async fn login(&self) -> Result<String, ManagerError> {
        let method = "auth/login";
        let url = self.endpoint(method)?;
        let body = json!({ "login": self.user, "password": self.password });

        let response = self
            .send(method, || self.client.post(url.clone()).json(&body))
            .await?;

        let session_key = extract_session_cookie(
            response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        );

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ManagerError::AuthenticationFailed {
                user: self.user.clone(),
                message: "invalid credentials".to_string(),
            });
        }

        let _: Value = Self::decode(method, response).await.map_err(|e| match e {
            ManagerError::ApiFault { message, .. } => ManagerError::AuthenticationFailed {
                user: self.user.clone(),
                message,
            },
            other => other,
        })?;

        session_key.ok_or_else(|| ManagerError::AuthenticationFailed {
            user: self.user.clone(),
            message: format!("no {} returned by server", SESSION_COOKIE),
        })
    }

    async fn channel_exists(&self, auth: &AuthContext, label: &str) -> Result<bool, ManagerError> {
        self.get(
            auth,
            "channel/software/isExisting",
            &[("channelLabel", label)],
        )
        .await
    }

    async fn channel_list_children(
        &self,
        auth: &AuthContext,
        base_label: &str,
    ) -> Result<Vec<Channel>, ManagerError> {
        self.get(
            auth,
            "channel/software/listChildren",
            &[("channelLabel", base_label)],
        )
        .await
    }

    async fn project_lookup(
        &self,
        auth: &AuthContext,
        project: &str,
    ) -> Result<Option<Project>, ManagerError> {
        let projects: Vec<Project> = self
            .get(auth, "contentmanagement/listProjects", &[])
            .await?;
        Ok(projects.into_iter().find(|p| p.label == project))
    }

    async fn project_create(
        &self,
        auth: &AuthContext,
        label: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/createProject",
                json!({ "projectLabel": label, "name": name, "description": description }),
            )
            .await?;
        Ok(())
    }

    async fn project_build(&self, auth: &AuthContext, project: &str) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/buildProject",
                json!({ "projectLabel": project }),
            )
            .await?;
        Ok(())
    }

    async fn project_promote(
        &self,
        auth: &AuthContext,
        project: &str,
        from_env: &str,
    ) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/promoteProject",
                json!({ "projectLabel": project, "envLabel": from_env }),
            )
            .await?;
        Ok(())
    }

    async fn environment_lookup(
        &self,
        auth: &AuthContext,
        project: &str,
        env: &str,
    ) -> Result<Option<Environment>, ManagerError> {
        let environments: Vec<Environment> = self
            .get(
                auth,
                "contentmanagement/listProjectEnvironments",
                &[("projectLabel", project)],
            )
            .await?;
        Ok(environments.into_iter().find(|e| e.label == env))
    }

    async fn environment_create(
        &self,
        auth: &AuthContext,
        project: &str,
        previous_env: &str,
        env_label: &str,
        env_name: &str,
        description: &str,
    ) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/createEnvironment",
                json!({
                    "projectLabel": project,
                    "predecessorLabel": previous_env,
                    "envLabel": env_label,
                    "name": env_name,
                    "description": description,
                }),
            )
            .await?;
        Ok(())
    }

    async fn attach_source(
        &self,
        auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/attachSource",
                json!({
                    "projectLabel": project,
                    "sourceType": source_type.as_str(),
                    "sourceLabel": source_label,
                }),
            )
            .await?;
        Ok(())
    }

    async fn detach_source(
        &self,
        auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError> {
        let _: Value = self
            .post(
                auth,
                "contentmanagement/detachSource",
                json!({
                    "projectLabel": project,
                    "sourceType": source_type.as_str(),
                    "sourceLabel": source_label,
                }),
            )
            .await?;
        Ok(())
    }
}
