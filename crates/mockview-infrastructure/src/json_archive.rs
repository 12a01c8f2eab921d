//! File-based interview archive.
//!
//! Each session is stored as one JSON document, `<archive_dir>/<session_id>.json`,
//! holding the session snapshot, its transcript and the feedback report.

use crate::paths::MockviewPaths;
use crate::storage::AtomicFile;
use async_trait::async_trait;
use mockview_core::archive::{InterviewArchive, InterviewHistory, SessionSummary};
use mockview_core::feedback::FeedbackReport;
use mockview_core::session::{Message, Session};
use mockview_core::{InterviewError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The on-disk document for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    session: Session,
    #[serde(default)]
    transcript: Vec<Message>,
    #[serde(default)]
    feedback: Option<FeedbackReport>,
}

impl SessionRecord {
    fn new(session: Session) -> Self {
        Self {
            session,
            transcript: Vec::new(),
            feedback: None,
        }
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session.id().to_string(),
            role: self.session.role().to_string(),
            date: self.session.created_at().to_string(),
            score: self.feedback.as_ref().map(FeedbackReport::average_score),
            status: self.session.status(),
        }
    }
}

/// Interview archive backed by a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    root: PathBuf,
}

impl JsonArchive {
    /// Creates an archive rooted at the platform data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::with_dir(MockviewPaths::archive_dir()?))
    }

    /// Creates an archive rooted at a specific directory.
    pub fn with_dir(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_file(&self, session_id: &str) -> Result<AtomicFile<SessionRecord>> {
        if session_id.is_empty()
            || session_id.contains('/')
            || session_id.contains('\\')
            || session_id.contains("..")
        {
            return Err(InterviewError::invalid_input(format!(
                "Invalid session id '{session_id}'"
            )));
        }
        Ok(AtomicFile::json(self.root.join(format!("{session_id}.json"))))
    }

    /// Runs blocking file work off the async runtime.
    async fn blocking<T, F>(f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| InterviewError::internal(format!("archive task failed: {e}")))?
    }

    fn load_all(root: &Path) -> Result<Vec<SessionRecord>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match AtomicFile::<SessionRecord>::json(path.clone()).load() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping unreadable archive file {}: {}", path.display(), e);
                }
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl InterviewArchive for JsonArchive {
    async fn save_session(&self, session: &Session) -> Result<()> {
        let file = self.record_file(session.id())?;
        let session = session.clone();
        Self::blocking(move || {
            file.update(SessionRecord::new(session.clone()), |record| {
                record.session = session;
                Ok(())
            })
        })
        .await
    }

    async fn update_session(&self, session: &Session) -> Result<()> {
        let file = self.record_file(session.id())?;
        let session = session.clone();
        let id = session.id().to_string();
        Self::blocking(move || {
            file.update_existing("session", &id, |record| {
                record.session = session;
                Ok(())
            })
        })
        .await
    }

    async fn save_message(&self, session_id: &str, message: &Message) -> Result<()> {
        let file = self.record_file(session_id)?;
        let message = message.clone();
        let id = session_id.to_string();
        Self::blocking(move || {
            file.update_existing("session", &id, |record| {
                record.transcript.push(message);
                Ok(())
            })
        })
        .await
    }

    async fn save_feedback(&self, report: &FeedbackReport) -> Result<()> {
        let file = self.record_file(&report.session_id)?;
        let report = report.clone();
        Self::blocking(move || {
            let id = report.session_id.clone();
            file.update_existing("session", &id, |record| {
                record.feedback = Some(report);
                Ok(())
            })
        })
        .await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let file = self.record_file(session_id)?;
        let record = Self::blocking(move || file.load()).await?;
        Ok(record.map(|record| record.session))
    }

    async fn get_user_history(&self, limit: Option<usize>) -> Result<InterviewHistory> {
        let root = self.root.clone();
        let mut records = Self::blocking(move || Self::load_all(&root)).await?;

        // RFC3339 timestamps sort lexically
        records.sort_by(|a, b| b.session.created_at().cmp(a.session.created_at()));

        let total_interviews = records.len();
        let scores: Vec<f64> = records
            .iter()
            .filter_map(|record| record.feedback.as_ref().map(FeedbackReport::average_score))
            .collect();
        let average_score = if scores.is_empty() {
            None
        } else {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            Some((mean * 100.0).round() / 100.0)
        };

        let sessions = records
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(SessionRecord::summary)
            .collect();

        Ok(InterviewHistory {
            sessions,
            total_interviews,
            average_score,
        })
    }

    async fn get_session_transcript(&self, session_id: &str) -> Result<Vec<Message>> {
        let file = self.record_file(session_id)?;
        let id = session_id.to_string();
        let record = Self::blocking(move || file.load()).await?;
        record
            .map(|record| record.transcript)
            .ok_or_else(|| InterviewError::not_found("session", id))
    }
}
