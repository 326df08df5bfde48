use axum::{extract::State, Json};
use tracing::info;

use super::origin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, EnvelopeBuilder, SuccessResponse};
use crate::domain::charts::ChartSet;

/// Charts as `data:image/png;base64,...` URIs
pub async fn get_charts(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<ChartSet>>, ApiError> {
    let envelope = EnvelopeBuilder::start(state.provider.as_ref());

    let charts = state.provider.charts().await?.to_data_uris();
    let metadata = state.provider.metadata().await?;

    let message = format!("Charts {}", origin(state.provider.as_ref()));
    let response = envelope.finish(charts, message, metadata.as_ref());

    info!(
        secs = response.api_performance.api_response_time_sec,
        cached = response.api_performance.cached,
        "Charts served"
    );

    Ok(Json(response))
}
