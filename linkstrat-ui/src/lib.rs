//! linkstrat-ui library interface
//!
//! Exposes the wizard engine, generation pipeline, and HTTP API for
//! integration testing.

pub mod api;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod services;
pub mod wizard;

pub use crate::error::{ApiError, ApiResult};

use crate::catalog::Catalog;
use crate::pipeline::GenerationPipeline;
use crate::services::{GeminiClient, TextGenerator};
use crate::wizard::engine::WizardEngine;
use axum::Router;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Static question catalog
    pub catalog: Arc<Catalog>,
    /// The single active wizard session, if any
    pub wizard: Arc<RwLock<Option<WizardEngine>>>,
    /// Generation pipelines keyed by submission id
    pub pipelines: Arc<RwLock<HashMap<Uuid, Arc<GenerationPipeline>>>>,
    /// Test seam: when set, handlers use this generator instead of
    /// constructing a Gemini client from the resolved credential
    generator_override: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            catalog: Arc::new(Catalog::standard()),
            wizard: Arc::new(RwLock::new(None)),
            pipelines: Arc::new(RwLock::new(HashMap::new())),
            generator_override: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator_override = Some(generator);
        self
    }

    /// Resolve a generator for one request, failing closed when the
    /// credential is absent
    pub async fn resolve_generator(&self) -> ApiResult<Arc<dyn TextGenerator>> {
        if let Some(generator) = &self.generator_override {
            return Ok(generator.clone());
        }
        let Some(api_key) = config::resolve_gemini_api_key(&self.db).await? else {
            return Err(ApiError::Config(config::MISSING_KEY_MESSAGE.to_string()));
        };
        let client = GeminiClient::new(api_key)
            .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Arc::new(client))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::wizard_routes())
        .merge(api::generate_routes())
        .merge(api::strategy_routes())
        .merge(api::settings_routes())
        .merge(api::health_routes())
        .with_state(state)
}
