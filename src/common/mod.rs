pub mod error;
pub mod logging;
pub mod result;
pub mod return_codes;
