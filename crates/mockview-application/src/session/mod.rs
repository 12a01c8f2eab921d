//! Session application services.
//!
//! - `locks`: per-session serialization of mutating calls
//! - `followup`: interpretation of the completeness-analysis reply

pub mod followup;
mod locks;

pub use followup::parse_followup_reply;
pub use locks::SessionLocks;
