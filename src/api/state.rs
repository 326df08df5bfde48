//! Application state shared by the handlers

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::domain::insights::{InsightsRepository, ResultProvider};

/// Handlers see results only through `provider`; `repository` is kept
/// for the health check's cache ping
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn ResultProvider>,
    pub repository: Arc<dyn InsightsRepository>,
    pub api: ApiConfig,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ResultProvider>,
        repository: Arc<dyn InsightsRepository>,
        api: ApiConfig,
    ) -> Self {
        Self {
            provider,
            repository,
            api,
        }
    }
}
