//! In-memory session store.

use async_trait::async_trait;
use mockview_core::session::{Session, SessionStore};
use mockview_core::{InterviewError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Live sessions held in process memory.
///
/// Cloning shares the underlying map. Nothing survives a restart; the
/// interview archive is the durable record.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn put(&self, session: Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id().to_string(), session);
        Ok(())
    }

    async fn update(&self, session: Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session.id()) {
            Some(slot) => {
                *slot = session;
                Ok(())
            }
            None => Err(InterviewError::not_found("session", session.id())),
        }
    }

    async fn list(&self) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self.sessions.read().await.values().cloned().collect();
        sessions.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockview_core::session::InterviewMode;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = Session::new("backend_engineer", InterviewMode::Chat);
        let id = session.id().to_string();

        store.put(session.clone()).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(session));
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_requires_existing() {
        let store = InMemorySessionStore::new();
        let session = Session::new("backend_engineer", InterviewMode::Chat);
        let err = store.update(session).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces() {
        let store = InMemorySessionStore::new();
        let mut session = Session::new("backend_engineer", InterviewMode::Voice);
        store.put(session.clone()).await.unwrap();

        session.complete();
        store.update(session.clone()).await.unwrap();

        let stored = store.get(session.id()).await.unwrap().unwrap();
        assert!(!stored.is_active());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts() {
        let store = InMemorySessionStore::new();
        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .put(Session::new("product_manager", InterviewMode::Chat))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.list().await.unwrap().len(), 20);
    }
}
