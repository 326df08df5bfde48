//! Health endpoint reporting cache connectivity and data state

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::state::AppState;
use super::types::timestamp;
use crate::domain::insights::DataState;

pub const SERVICE_NAME: &str = "Nutritional Insights API";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub checks: HealthChecks,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    Connected,
    Error,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub cache: CacheStatus,
    pub data_state: DataState,
    pub last_processed: Option<DateTime<Utc>>,
    pub total_recipes: Option<usize>,
    pub diet_types: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 200 when the cache answers a ping, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks = HealthChecks {
        cache: CacheStatus::Connected,
        data_state: DataState::Unprocessed,
        last_processed: None,
        total_recipes: None,
        diet_types: None,
        message: None,
    };

    if let Err(e) = state.repository.ping().await {
        warn!(error = %e, "Cache ping failed");
        checks.cache = CacheStatus::Error;
        checks.message = Some(e.to_string());
    } else {
        match state.provider.metadata().await {
            Ok(metadata) => {
                checks.data_state = DataState::of(metadata.as_ref());

                match metadata {
                    Some(m) => {
                        checks.last_processed = Some(m.last_processed);
                        checks.total_recipes = Some(m.total_recipes);
                        checks.diet_types = Some(m.diet_types_count);
                    }
                    None => {
                        checks.message = Some(
                            "No data processed yet. Upload the recipe CSV to trigger processing."
                                .to_string(),
                        );
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Metadata unavailable");
                checks.message = Some(e.to_string());
            }
        }
    }

    let (status, code) = match checks.cache {
        CacheStatus::Connected => (HealthStatus::Healthy, StatusCode::OK),
        CacheStatus::Error => (HealthStatus::Degraded, StatusCode::SERVICE_UNAVAILABLE),
    };

    info!(status = ?status, data_state = checks.data_state.as_str(), "Health check");

    let response = HealthResponse {
        status,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
        checks,
    };

    (code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
        assert_eq!(
            serde_json::to_string(&CacheStatus::Connected).unwrap(),
            "\"connected\""
        );
    }

    #[test]
    fn test_checks_skip_empty_message() {
        let checks = HealthChecks {
            cache: CacheStatus::Connected,
            data_state: DataState::Ready,
            last_processed: None,
            total_recipes: Some(3),
            diet_types: Some(2),
            message: None,
        };

        let json = serde_json::to_value(&checks).unwrap();

        assert_eq!(json["data_state"], "ready");
        assert_eq!(json["total_recipes"], 3);
        assert!(json.get("message").is_none());
    }
}
