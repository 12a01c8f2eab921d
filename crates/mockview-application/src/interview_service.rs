//! Session Orchestrator
//!
//! `InterviewService` drives an interview: it creates sessions, records
//! answers, classifies personas, decides between a follow-up and the next
//! question, and finalizes sessions. Live state lives in a [`SessionStore`];
//! an optional [`InterviewArchive`] receives a best-effort durable copy.

use crate::feedback_service::FeedbackService;
use crate::session::{SessionLocks, parse_followup_reply};
use mockview_core::archive::InterviewArchive;
use mockview_core::config::InterviewConfig;
use mockview_core::feedback::FeedbackReport;
use mockview_core::llm::{GenerationRequest, LanguageModel};
use mockview_core::persona::{Persona, PersonaClassifier};
use mockview_core::prompt::{
    completion_message, followup_analysis_prompt, format_question_with_context,
    interviewer_system_prompt, intro_message, transition_message,
};
use mockview_core::role::{Role, RoleProvider};
use mockview_core::session::{
    InterviewMode, InterviewTurn, Message, Session, SessionProgress, SessionStatus, SessionStore,
};
use mockview_core::{InterviewError, Result};
use std::sync::Arc;

/// Minimum transcript length (one question and one answer) for feedback.
const MIN_FEEDBACK_MESSAGES: usize = 2;

/// Orchestrates interview sessions.
#[derive(Clone)]
pub struct InterviewService {
    store: Arc<dyn SessionStore>,
    roles: Arc<dyn RoleProvider>,
    gateway: Arc<dyn LanguageModel>,
    archive: Option<Arc<dyn InterviewArchive>>,
    classifier: PersonaClassifier,
    locks: SessionLocks,
    config: InterviewConfig,
}

impl InterviewService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        roles: Arc<dyn RoleProvider>,
        gateway: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            store,
            roles,
            gateway,
            archive: None,
            classifier: PersonaClassifier::new(),
            locks: SessionLocks::new(),
            config: InterviewConfig::default(),
        }
    }

    /// Attaches a durable archive. Archive failures are logged, never returned.
    pub fn with_archive(mut self, archive: Arc<dyn InterviewArchive>) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn with_config(mut self, config: InterviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn roles(&self) -> &dyn RoleProvider {
        self.roles.as_ref()
    }

    /// Per-session locks; entries are dropped once a session completes.
    pub fn locks(&self) -> &SessionLocks {
        &self.locks
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Creates a session and asks its first question.
    ///
    /// # Arguments
    ///
    /// * `role_name` - Catalog key of the role
    /// * `mode` - `chat` or `voice`
    ///
    /// # Returns
    ///
    /// The new session and the formatted first question.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown role or mode.
    pub async fn create_session(&self, role_name: &str, mode: &str) -> Result<(Session, String)> {
        let role = self.require_role(role_name)?;
        let mode: InterviewMode = mode.parse()?;

        let mut session = Session::new(role_name, mode);
        let question = role
            .question(0)
            .ok_or_else(|| InterviewError::invalid_state("No more questions available"))?;
        session.append_message(Message::question(question)?)?;

        let formatted = format_question_with_context(
            question,
            1,
            role.total_questions(),
            Some(session.persona().persona_type),
        );

        self.store.put(session.clone()).await?;
        tracing::info!(
            session_id = session.id(),
            role = role_name,
            mode = %mode,
            "Interview session created"
        );

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.save_session(&session).await {
                tracing::warn!(session_id = session.id(), error = %e, "Failed to archive session");
            }
        }
        self.archive_messages(session.id(), session.messages()).await;

        Ok((session, formatted))
    }

    /// Records an answer and decides what the interviewer says next.
    ///
    /// Nothing is stored if any step fails.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidState` if the session is completed
    /// - `InvalidInput` if the answer is blank
    pub async fn process_answer(&self, session_id: &str, answer: &str) -> Result<InterviewTurn> {
        let turn = {
            let _guard = self.locks.acquire(session_id).await;
            self.answer_locked(session_id, answer).await
        };
        if matches!(&turn, Ok(turn) if turn.is_complete()) {
            self.locks.release(session_id).await;
        }
        turn
    }

    async fn answer_locked(&self, session_id: &str, answer: &str) -> Result<InterviewTurn> {
        let mut session = self.load_session(session_id).await?;
        session.ensure_active()?;
        if answer.trim().is_empty() {
            return Err(InterviewError::invalid_input("Answer cannot be empty"));
        }

        let role = self.require_session_role(&session)?;
        let question = role
            .question(session.current_question_index())
            .unwrap_or_default()
            .to_string();
        let recorded_before = session.messages().len();

        session.append_message(Message::answer(answer.trim())?)?;

        let previous = session.persona().persona_type;
        let persona = self
            .classifier
            .classify(answer, session.messages(), Some(previous));
        session.set_persona(persona.clone())?;

        let turn = match self.should_ask_followup(&session, answer, &question).await {
            Some(followup) => {
                session.record_followup(Message::followup(followup.as_str())?)?;
                InterviewTurn::Followup {
                    content: self.classifier.adapt_response(&followup, &persona),
                    question_number: session.current_question_index() + 1,
                    persona,
                }
            }
            None => self.advance(&mut session, role, persona)?,
        };

        self.store.update(session.clone()).await?;
        tracing::info!(
            session_id,
            persona = %turn.persona().persona_type,
            confidence = turn.persona().confidence,
            decision = turn.kind(),
            question_number = turn.question_number(),
            "Answer processed"
        );

        self.archive_messages(session_id, &session.messages()[recorded_before..])
            .await;
        self.archive_update(&session).await;

        Ok(turn)
    }

    /// Moves past the current question, completing the session at the end.
    fn advance(&self, session: &mut Session, role: &Role, persona: Persona) -> Result<InterviewTurn> {
        let index = session.advance_question()?;

        match role.question(index) {
            None => {
                session.complete();
                Ok(InterviewTurn::Complete {
                    content: completion_message().to_string(),
                    question_number: index,
                    persona,
                })
            }
            Some(next) => {
                session.append_message(Message::question(next)?)?;
                let formatted = format_question_with_context(
                    next,
                    index + 1,
                    role.total_questions(),
                    Some(persona.persona_type),
                );
                let transition = transition_message(index, index + 1);
                Ok(InterviewTurn::NextQuestion {
                    content: format!("{transition}\n\n{formatted}"),
                    question_number: index + 1,
                    persona,
                })
            }
        }
    }

    /// Asks the language model whether the answer needs a follow-up.
    ///
    /// Never fails: the cap, a missing role, or any gateway failure all mean
    /// "no follow-up" so the interview keeps moving.
    ///
    /// # Returns
    ///
    /// The follow-up question, or `None` to advance.
    pub async fn should_ask_followup(
        &self,
        session: &Session,
        answer: &str,
        question: &str,
    ) -> Option<String> {
        if !session.can_ask_followup() {
            return None;
        }
        let role = self.roles.get_role(session.role())?;

        let request = match self.followup_request(session, role, question, answer) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(session_id = session.id(), error = %e, "Failed to build follow-up prompt");
                return None;
            }
        };

        match self.gateway.generate(request).await {
            Ok(reply) => parse_followup_reply(&reply),
            Err(e) => {
                tracing::warn!(
                    session_id = session.id(),
                    error = %e,
                    "Follow-up analysis failed, moving on"
                );
                None
            }
        }
    }

    fn followup_request(
        &self,
        session: &Session,
        role: &Role,
        question: &str,
        answer: &str,
    ) -> Result<GenerationRequest> {
        let prompt = followup_analysis_prompt(role, question, answer)?;
        let system =
            interviewer_system_prompt(role, question, Some(session.persona().persona_type))?;
        Ok(GenerationRequest::new(prompt)
            .with_system(system)
            .with_temperature(self.config.followup_temperature))
    }

    /// Marks a session completed. Ending an ended session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the session does not exist.
    pub async fn end_session(&self, session_id: &str) -> Result<Session> {
        let ended = {
            let _guard = self.locks.acquire(session_id).await;
            self.end_locked(session_id).await
        };
        self.locks.release(session_id).await;
        ended
    }

    async fn end_locked(&self, session_id: &str) -> Result<Session> {
        let mut session = self.load_session(session_id).await?;
        session.complete();
        self.store.update(session.clone()).await?;
        tracing::info!(session_id, answers = session.answer_count(), "Interview session ended");

        self.archive_update(&session).await;
        Ok(session)
    }

    /// Ends the session and generates its feedback report.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `InvalidInput` if no question has been answered yet
    /// - Any feedback error from [`FeedbackService::generate_feedback`]
    pub async fn complete_with_feedback(
        &self,
        session_id: &str,
        feedback: &FeedbackService,
    ) -> Result<FeedbackReport> {
        let session = self.end_session(session_id).await?;
        if session.messages().len() < MIN_FEEDBACK_MESSAGES {
            return Err(InterviewError::invalid_input(
                "Insufficient interview data to generate feedback. \
                 Please answer at least one question.",
            ));
        }
        let role = self.require_session_role(&session)?;

        let report = feedback
            .generate_feedback(session.id(), role, session.messages())
            .await?;

        if let Some(archive) = &self.archive {
            if let Err(e) = archive.save_feedback(&report).await {
                tracing::warn!(session_id, error = %e, "Failed to archive feedback");
            }
        }
        Ok(report)
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn get_session(&self, session_id: &str) -> Result<Session> {
        self.load_session(session_id).await
    }

    pub async fn get_session_persona(&self, session_id: &str) -> Result<Persona> {
        Ok(self.load_session(session_id).await?.persona().clone())
    }

    /// Returns the session's messages in order.
    pub async fn get_session_transcript(&self, session_id: &str) -> Result<Vec<Message>> {
        Ok(self.load_session(session_id).await?.messages().to_vec())
    }

    pub async fn get_session_progress(&self, session_id: &str) -> Result<SessionProgress> {
        let session = self.load_session(session_id).await?;
        let total = self
            .roles
            .get_role(session.role())
            .map(Role::total_questions)
            .unwrap_or(0);
        Ok(SessionProgress::from_session(&session, total))
    }

    pub async fn list_active_sessions(&self) -> Result<Vec<Session>> {
        self.list_by_status(SessionStatus::Active).await
    }

    pub async fn list_completed_sessions(&self) -> Result<Vec<Session>> {
        self.list_by_status(SessionStatus::Completed).await
    }

    /// Welcome text for a role and mode.
    pub fn intro_message(&self, role_name: &str, mode: &str) -> Result<String> {
        let role = self.require_role(role_name)?;
        let mode: InterviewMode = mode.parse()?;
        intro_message(role, mode)
    }

    /// Rejects answers longer than the configured word cap.
    pub fn validate_answer_length(&self, answer: &str) -> Result<()> {
        let words = answer.split_whitespace().count();
        if words > self.config.max_answer_words {
            return Err(InterviewError::invalid_input(format!(
                "Answer too long ({words} words). Please keep your response under {} words.",
                self.config.max_answer_words
            )));
        }
        Ok(())
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    async fn load_session(&self, session_id: &str) -> Result<Session> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| InterviewError::not_found("session", session_id))
    }

    async fn list_by_status(&self, status: SessionStatus) -> Result<Vec<Session>> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|session| session.status() == status)
            .collect())
    }

    fn require_role(&self, role_name: &str) -> Result<&Role> {
        self.roles.get_role(role_name).ok_or_else(|| {
            InterviewError::invalid_input(format!(
                "Invalid role '{}'. Available roles: {}",
                role_name,
                self.roles.list_role_names().join(", ")
            ))
        })
    }

    fn require_session_role(&self, session: &Session) -> Result<&Role> {
        self.roles
            .get_role(session.role())
            .ok_or_else(|| InterviewError::not_found("role", session.role()))
    }

    async fn archive_messages(&self, session_id: &str, messages: &[Message]) {
        let Some(archive) = &self.archive else {
            return;
        };
        for message in messages {
            if let Err(e) = archive.save_message(session_id, message).await {
                tracing::warn!(session_id, error = %e, "Failed to archive message");
            }
        }
    }

    async fn archive_update(&self, session: &Session) {
        let Some(archive) = &self.archive else {
            return;
        };
        if let Err(e) = archive.update_session(session).await {
            tracing::warn!(session_id = session.id(), error = %e, "Failed to archive session update");
        }
    }
}
