//! Session store trait.
//!
//! Defines the key-value interface the orchestrator keeps live sessions in.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for live interview sessions, keyed by session id.
///
/// Implementations must support concurrent insert/read/update from
/// independent sessions. Serializing access to a single session is the
/// orchestrator's job, not the store's.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;

    /// Inserts a new session, replacing any existing entry with the same id.
    async fn put(&self, session: Session) -> Result<()>;

    /// Replaces an existing session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no session with the same id exists.
    async fn update(&self, session: Session) -> Result<()>;

    /// Lists all stored sessions.
    async fn list(&self) -> Result<Vec<Session>>;
}
