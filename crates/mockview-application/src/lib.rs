//! Application layer for Mockview.
//!
//! This crate provides the use cases that coordinate the domain model with
//! the session store, the role catalog, the language model and the archive.

pub mod feedback_service;
pub mod interview_service;
pub mod session;

pub use feedback_service::FeedbackService;
pub use interview_service::InterviewService;
pub use session::SessionLocks;
