pub mod create_software_project;
pub mod sync_stage;
