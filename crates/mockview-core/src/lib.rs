//! Domain layer of Mockview: interview sessions, persona detection, prompt
//! templates, feedback repair and the traits adapters implement.

pub mod archive;
pub mod config;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod role;
pub mod session;

// Re-export common error type
pub use error::{InterviewError, Result};
