//! Interview session domain module.
//!
//! # Module Structure
//!
//! - `model`: The `Session` entity and its lifecycle enums
//! - `message`: Immutable transcript records
//! - `response`: The tagged result of processing an answer
//! - `progress`: Progress snapshots
//! - `repository`: The `SessionStore` trait

mod message;
mod model;
mod progress;
mod repository;
mod response;

pub use message::{Message, MessageType};
pub use model::{InterviewMode, MAX_FOLLOWUPS_PER_QUESTION, Session, SessionStatus};
pub use progress::SessionProgress;
pub use repository::SessionStore;
pub use response::InterviewTurn;
