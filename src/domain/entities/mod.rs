pub mod input_data;
pub mod project;
pub mod suman_config;

pub use input_data::InputData;
pub use project::{Channel, Environment, EnvironmentStatus, Project};
pub use suman_config::{Config, LogConfig, SumanConfig};
