//! SUSE Manager API access
//!
//! The use cases only see the [`ManagerProxy`] trait; [`HttpManagerProxy`]
//! talks to the server's JSON over HTTP API.

pub mod http_proxy;
pub mod manager_interface;

pub use http_proxy::HttpManagerProxy;
pub use manager_interface::{ManagerError, ManagerProxy, SourceType};

#[cfg(test)]
pub use manager_interface::MockManagerProxy;
