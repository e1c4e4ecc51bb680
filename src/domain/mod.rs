//! Domain layer: entities observed on SUSE Manager and operator input.

pub mod entities;
pub mod value_objects;
