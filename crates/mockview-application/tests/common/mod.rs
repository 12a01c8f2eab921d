//! Shared fixtures for orchestrator and synthesizer tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mockview_application::{FeedbackService, InterviewService};
use mockview_core::llm::{GatewayError, GenerationRequest, LanguageModel};
use mockview_infrastructure::{InMemorySessionStore, RoleCatalog};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A gateway that replays scripted replies in order.
///
/// Once the script runs out, `fallback` is returned for every call.
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    fallback: Result<String, GatewayError>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Duration,
}

impl ScriptedGateway {
    pub fn new(fallback: Result<String, GatewayError>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback,
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Replies `COMPLETE` to everything.
    pub fn always_complete() -> Self {
        Self::new(Ok("COMPLETE".to_string()))
    }

    pub fn failing(error: GatewayError) -> Self {
        Self::new(Err(error))
    }

    pub fn then(self, reply: Result<String, GatewayError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn then_ok(self, reply: impl Into<String>) -> Self {
        self.then(Ok(reply.into()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedGateway {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GatewayError> {
        if request.has_empty_prompt() {
            return Err(GatewayError::EmptyPrompt);
        }
        self.requests.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.replies.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    async fn check_health(&self) -> bool {
        true
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        Ok(vec!["scripted".to_string()])
    }
}

pub struct Fixture {
    pub service: InterviewService,
    pub store: InMemorySessionStore,
    pub gateway: Arc<ScriptedGateway>,
}

pub fn fixture(gateway: ScriptedGateway) -> Fixture {
    let gateway = Arc::new(gateway);
    let store = InMemorySessionStore::new();
    let roles = Arc::new(RoleCatalog::builtin().unwrap());
    let service = InterviewService::new(Arc::new(store.clone()), roles, gateway.clone());
    Fixture {
        service,
        store,
        gateway,
    }
}

pub fn feedback_service(gateway: ScriptedGateway) -> (FeedbackService, Arc<ScriptedGateway>) {
    let gateway = Arc::new(gateway);
    (FeedbackService::new(gateway.clone()), gateway)
}

/// A plain answer that classifies as normal.
pub const PLAIN_ANSWER: &str = "Um, I led the migration of our monolith to services over two \
     quarters, coordinating four teams and keeping the old system running throughout while \
     we moved traffic gradually using feature flags and careful monitoring of error rates \
     and latency on both paths, which actually worked well for us in the end.";
