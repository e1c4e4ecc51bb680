//! In-memory SUSE Manager for testing
//!
//! `FakeManager` keeps just enough server state to run the use cases end to
//! end and records every API call in order, so tests can assert on the exact
//! call sequence.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use suman::domain::entities::{Channel, Environment, EnvironmentStatus, Project};
use suman::domain::value_objects::AuthContext;
use suman::infrastructure::manager::{ManagerError, ManagerProxy, SourceType};

/// Session key handed out by the fake login
pub const SESSION_KEY: &str = "fake-session";

#[derive(Default)]
struct FakeState {
    /// Channels on the server with their children
    channels: HashMap<String, Vec<String>>,
    projects: HashMap<String, Project>,
    /// Environments per (project, label); a lookup pops the front until one state is left
    environments: HashMap<(String, String), VecDeque<Environment>>,
    /// Attached software sources per project
    sources: HashMap<String, Vec<String>>,
    /// Calls that fail with an API fault, from the given occurrence on
    failing_calls: HashMap<String, usize>,
    login_fails: bool,
}

/// Recording fake of the SUSE Manager API
#[derive(Default)]
pub struct FakeManager {
    state: Mutex<FakeState>,
    calls: Mutex<Vec<String>>,
}

impl FakeManager {
    /// Create an empty server
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel with its child channels (children are created too)
    pub fn with_channel(self, label: &str, children: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for child in children {
                state.channels.entry(child.to_string()).or_default();
            }
            state.channels.insert(
                label.to_string(),
                children.iter().map(|c| c.to_string()).collect(),
            );
        }
        self
    }

    /// Add an existing project
    pub fn with_project(self, label: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .projects
            .insert(label.to_string(), Project::new(label));
        self
    }

    /// Add an environment whose status changes on every lookup
    ///
    /// Each lookup returns the next status; the last one sticks.
    pub fn with_environment(
        self,
        project: &str,
        label: &str,
        previous: &str,
        statuses: &[EnvironmentStatus],
    ) -> Self {
        let states = statuses
            .iter()
            .map(|status| {
                Environment::new(label)
                    .with_previous(previous)
                    .with_status(status.clone())
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .environments
            .insert((project.to_string(), label.to_string()), states);
        self
    }

    /// Make one recorded call (e.g. `AttachSource(p1,software,c1)`) fail
    pub fn failing_on(self, call: &str) -> Self {
        self.failing_from(call, 1)
    }

    /// Make a recorded call fail from its `occurrence`-th invocation on (1-based)
    pub fn failing_from(self, call: &str, occurrence: usize) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_calls
            .insert(call.to_string(), occurrence);
        self
    }

    /// Reject every login
    pub fn with_failing_login(self) -> Self {
        self.state.lock().unwrap().login_fails = true;
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget the recorded calls, keeping the server state
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Number of recorded calls with the given API name
    pub fn count(&self, name: &str) -> usize {
        let prefix = format!("{}(", name);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&prefix) || c.as_str() == name)
            .count()
    }

    /// Sources attached to a project, in attach order
    pub fn sources(&self, project: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .sources
            .get(project)
            .cloned()
            .unwrap_or_default()
    }

    /// Labels and predecessors of a project's environments, sorted by label
    pub fn environments(&self, project: &str) -> Vec<(String, String)> {
        let state = self.state.lock().unwrap();
        let mut envs: Vec<_> = state
            .environments
            .iter()
            .filter(|((p, _), _)| p == project)
            .filter_map(|(_, states)| states.back())
            .map(|e| (e.label.clone(), e.previous_environment_label.clone()))
            .collect();
        envs.sort();
        envs
    }

    pub fn has_project(&self, project: &str) -> bool {
        self.state.lock().unwrap().projects.contains_key(project)
    }

    fn record(&self, call: String) -> Result<(), ManagerError> {
        let fail_from = self.state.lock().unwrap().failing_calls.get(&call).copied();
        let method = call.split('(').next().unwrap_or_default().to_string();
        let mut calls = self.calls.lock().unwrap();
        calls.push(call.clone());
        let occurrence = calls.iter().filter(|c| **c == call).count();
        drop(calls);
        if fail_from.is_some_and(|from| occurrence >= from) {
            return Err(ManagerError::api_fault(method, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl ManagerProxy for FakeManager {
    async fn login(&self) -> Result<String, ManagerError> {
        self.record("Login".to_string())?;
        if self.state.lock().unwrap().login_fails {
            return Err(ManagerError::AuthenticationFailed {
                user: "admin".to_string(),
                message: "invalid credentials".to_string(),
            });
        }
        Ok(SESSION_KEY.to_string())
    }

    async fn channel_exists(&self, _auth: &AuthContext, label: &str) -> Result<bool, ManagerError> {
        self.record(format!("ChannelExists({})", label))?;
        Ok(self.state.lock().unwrap().channels.contains_key(label))
    }

    async fn channel_list_children(
        &self,
        _auth: &AuthContext,
        base_label: &str,
    ) -> Result<Vec<Channel>, ManagerError> {
        self.record(format!("ChannelListChildren({})", base_label))?;
        let state = self.state.lock().unwrap();
        Ok(state
            .channels
            .get(base_label)
            .map(|children| children.iter().map(Channel::new).collect())
            .unwrap_or_default())
    }

    async fn project_lookup(
        &self,
        _auth: &AuthContext,
        project: &str,
    ) -> Result<Option<Project>, ManagerError> {
        self.record(format!("ProjectLookup({})", project))?;
        Ok(self.state.lock().unwrap().projects.get(project).cloned())
    }

    async fn project_create(
        &self,
        _auth: &AuthContext,
        label: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ManagerError> {
        self.record(format!("ProjectCreate({},{},{})", label, name, description))?;
        let project = Project::new(label).with_description(description);
        self.state
            .lock()
            .unwrap()
            .projects
            .insert(label.to_string(), project);
        Ok(())
    }

    async fn project_build(&self, _auth: &AuthContext, project: &str) -> Result<(), ManagerError> {
        self.record(format!("ProjectBuild({})", project))
    }

    async fn project_promote(
        &self,
        _auth: &AuthContext,
        project: &str,
        from_env: &str,
    ) -> Result<(), ManagerError> {
        self.record(format!("ProjectPromote({},{})", project, from_env))
    }

    async fn environment_lookup(
        &self,
        _auth: &AuthContext,
        project: &str,
        env: &str,
    ) -> Result<Option<Environment>, ManagerError> {
        self.record(format!("EnvironmentLookup({},{})", project, env))?;
        let mut state = self.state.lock().unwrap();
        let key = (project.to_string(), env.to_string());
        Ok(state.environments.get_mut(&key).and_then(|states| {
            if states.len() > 1 {
                states.pop_front()
            } else {
                states.front().cloned()
            }
        }))
    }

    async fn environment_create(
        &self,
        _auth: &AuthContext,
        project: &str,
        previous_env: &str,
        env_label: &str,
        env_name: &str,
        description: &str,
    ) -> Result<(), ManagerError> {
        self.record(format!(
            "EnvironmentCreate({},{},{},{},{})",
            project, previous_env, env_label, env_name, description
        ))?;
        let environment = Environment::new(env_label).with_previous(previous_env);
        self.state.lock().unwrap().environments.insert(
            (project.to_string(), env_label.to_string()),
            VecDeque::from([environment]),
        );
        Ok(())
    }

    async fn attach_source(
        &self,
        _auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError> {
        self.record(format!(
            "AttachSource({},{},{})",
            project, source_type, source_label
        ))?;
        let mut state = self.state.lock().unwrap();
        let sources = state.sources.entry(project.to_string()).or_default();
        if !sources.iter().any(|s| s == source_label) {
            sources.push(source_label.to_string());
        }
        Ok(())
    }

    async fn detach_source(
        &self,
        _auth: &AuthContext,
        project: &str,
        source_type: SourceType,
        source_label: &str,
    ) -> Result<(), ManagerError> {
        self.record(format!(
            "DetachSource({},{},{})",
            project, source_type, source_label
        ))?;
        let mut state = self.state.lock().unwrap();
        if let Some(sources) = state.sources.get_mut(project) {
            sources.retain(|s| s != source_label);
        }
        Ok(())
    }
}
