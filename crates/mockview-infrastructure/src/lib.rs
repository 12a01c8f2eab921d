//! Adapters for Mockview: platform paths, configuration, the role catalog,
//! the in-memory session store and the file-based interview archive.

pub mod config_service;
pub mod json_archive;
pub mod memory_session_store;
pub mod paths;
pub mod role_catalog;
pub mod storage;

pub use config_service::ConfigService;
pub use json_archive::JsonArchive;
pub use memory_session_store::InMemorySessionStore;
pub use paths::MockviewPaths;
pub use role_catalog::RoleCatalog;
