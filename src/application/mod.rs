//! Application layer: the use cases driving SUSE Manager.

pub mod services;
pub mod use_cases;
