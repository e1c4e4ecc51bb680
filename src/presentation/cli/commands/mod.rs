pub mod create_project;
pub mod sync_stage;

pub use create_project::*;
pub use sync_stage::*;
