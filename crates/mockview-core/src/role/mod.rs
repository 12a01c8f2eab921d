//! Role configuration domain module.

mod model;
mod provider;

pub use model::{MIN_QUESTIONS, REQUIRED_CRITERIA, Role, display_name_from_key};
pub use provider::RoleProvider;
