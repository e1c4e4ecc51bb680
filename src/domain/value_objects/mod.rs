pub mod auth_context;
pub mod label_list;

pub use auth_context::AuthContext;
pub use label_list::LabelList;
