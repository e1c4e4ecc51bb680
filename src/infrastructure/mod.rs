/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - SUSE Manager API access (proxy trait and HTTP client)
/// - File system operations (configuration file)
pub mod filesystem;
pub mod manager;

// Re-export commonly used types
pub use filesystem::config_store::{ConfigStore, ConfigStoreError};
pub use manager::{HttpManagerProxy, ManagerError, ManagerProxy, SourceType};
