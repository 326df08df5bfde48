use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::origin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, EnvelopeBuilder, SuccessResponse};
use crate::domain::analysis::InsightsSummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStats {
    pub total_recipes: usize,
    pub diet_types: usize,
    pub cuisines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsData {
    pub insights: InsightsSummary,
    pub data_stats: DataStats,
}

pub async fn get_insights(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<InsightsData>>, ApiError> {
    let envelope = EnvelopeBuilder::start(state.provider.as_ref());

    let insights = state.provider.insights().await?;
    let metadata = state.provider.metadata().await?;

    let data_stats = DataStats {
        total_recipes: insights.summary.total_recipes_analyzed,
        diet_types: insights.summary.diet_types_count,
        cuisines: insights.summary.cuisines_count,
    };

    let message = format!("Insights {}", origin(state.provider.as_ref()));
    let response = envelope.finish(
        InsightsData {
            insights,
            data_stats,
        },
        message,
        metadata.as_ref(),
    );

    info!(
        secs = response.api_performance.api_response_time_sec,
        cached = response.api_performance.cached,
        "Insights served"
    );

    Ok(Json(response))
}
