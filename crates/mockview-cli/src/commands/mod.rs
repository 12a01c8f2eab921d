pub mod backend;
pub mod config;
pub mod history;
pub mod roles;
