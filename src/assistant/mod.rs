pub mod intent;

use crate::catalog::store::CatalogStore;
use crate::commands::{self, CommandOutcome, RecommendOptions};
use crate::config::settings::AssistantConfig;
use crate::error::NeuroError;
use crate::metrics::Metrics;
use crate::profile::store::ProfileStore;
use self::intent::Intent;

/// How a classified request was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Answered by the learning core
    Handled(CommandOutcome),
    /// Belongs to an external collaborator (chat, search, IoT, ...)
    Delegate(Intent),
    /// No decision could be routed
    Unhandled,
}

/// Entry point for the orchestration layer.
/// Holds configuration and stores; every call loads and persists state itself.
#[derive(Debug, Clone)]
pub struct Assistant {
    config: AssistantConfig,
    profiles: ProfileStore,
    catalog: CatalogStore,
    metrics: Metrics,
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Self {
        let profiles = ProfileStore::new(config.profile_path());
        let catalog = CatalogStore::new(config.catalog_path());
        Assistant {
            config,
            profiles,
            catalog,
            metrics: Metrics::new(),
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn options(&self) -> RecommendOptions {
        RecommendOptions {
            top_k: self.config.top_k,
            hours_per_week: self.config.hours_per_week,
        }
    }

    /// Run one learner instruction through the command interpreter
    pub async fn run(&self, raw: &str) -> Result<CommandOutcome, NeuroError> {
        self.metrics.record_command();
        let result = commands::run(&self.profiles, &self.catalog, raw, self.options()).await;
        match &result {
            Ok(outcome) if outcome.payload.query.is_some() => self.metrics.record_recommendation(),
            Ok(outcome) if outcome.profile_updated => self.metrics.record_profile_update(),
            Ok(_) => {}
            Err(e) => {
                self.metrics.record_error();
                tracing::error!(error = %e, "Learning command failed");
            }
        }
        result
    }

    /// Route classifier decisions. The learning recommender runs in-core on the
    /// original query; other intents are handed back for their collaborator.
    pub async fn dispatch(&self, decisions: &[String], query: &str) -> Result<Dispatch, NeuroError> {
        match intent::select(decisions) {
            Some(Intent::LearningRecommender(_)) => {
                Ok(Dispatch::Handled(self.run(query).await?))
            }
            Some(other) => {
                self.metrics.record_delegation();
                tracing::info!(intent = ?other, "Delegating request");
                Ok(Dispatch::Delegate(other))
            }
            None => {
                tracing::warn!(decisions = ?decisions, "No routable decision");
                Ok(Dispatch::Unhandled)
            }
        }
    }
}
