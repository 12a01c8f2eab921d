//! Wiring of configuration, adapters and services for one CLI run.

use crate::GlobalArgs;
use anyhow::{Context, Result};
use mockview_application::{FeedbackService, InterviewService};
use mockview_core::config::RootConfig;
use mockview_infrastructure::{ConfigService, InMemorySessionStore, JsonArchive, RoleCatalog};
use mockview_interaction::OllamaGateway;
use std::sync::Arc;

pub struct App {
    pub config: RootConfig,
    pub roles: Arc<RoleCatalog>,
    pub gateway: Arc<OllamaGateway>,
    pub archive: Arc<JsonArchive>,
}

impl App {
    /// Loads configuration, applies flag overrides and builds the adapters.
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config_service = match &args.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };
        let mut config = config_service
            .get_config()
            .with_context(|| format!("loading {}", config_service.path().display()))?;

        if let Some(base_url) = &args.base_url {
            config.gateway.base_url = base_url.clone();
        }
        if let Some(model) = &args.model {
            config.gateway.model = model.clone();
        }
        if let Some(roles) = &args.roles {
            config.storage.roles_file = Some(roles.clone());
        }

        let roles = RoleCatalog::load_or_builtin(config.storage.roles_file.as_deref())
            .context("loading role catalog")?;
        let gateway = OllamaGateway::from_config(&config.gateway);
        let archive = match &config.storage.archive_dir {
            Some(dir) => JsonArchive::with_dir(dir),
            None => JsonArchive::new()?,
        };

        tracing::debug!(
            base_url = gateway.base_url(),
            model = gateway.model(),
            archive = %archive.root().display(),
            "Application wired"
        );

        Ok(Self {
            config,
            roles: Arc::new(roles),
            gateway: Arc::new(gateway),
            archive: Arc::new(archive),
        })
    }

    pub fn interview_service(&self) -> InterviewService {
        InterviewService::new(
            Arc::new(InMemorySessionStore::new()),
            self.roles.clone(),
            self.gateway.clone(),
        )
        .with_archive(self.archive.clone())
        .with_config(self.config.interview.clone())
    }

    pub fn feedback_service(&self) -> FeedbackService {
        FeedbackService::from_config(self.gateway.clone(), &self.config.feedback)
    }
}
