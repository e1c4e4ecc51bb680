//! Common test utilities and helpers
//!
//! Shared fakes and fixtures for the integration tests.

#![allow(dead_code)]

pub mod mock_services;

use suman::domain::entities::InputData;

/// Input of a create-project run against base channel `bc`
pub fn create_input(project: &str, environment: &str) -> InputData {
    InputData::new(project)
        .with_base_channel("bc")
        .with_environment(environment)
}

/// Owned call list, for comparing against a recorded history
pub fn calls(expected: &[&str]) -> Vec<String> {
    expected.iter().map(|c| c.to_string()).collect()
}
