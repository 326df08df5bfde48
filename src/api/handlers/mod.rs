//! Result endpoints, one handler set over whichever provider is configured

pub mod charts;
pub mod insights;
pub mod recipes;

use axum::http::Uri;

use super::types::ApiError;
use crate::domain::insights::ResultProvider;

/// How the results were obtained, for response messages
fn origin(provider: &dyn ResultProvider) -> &'static str {
    if provider.is_cached() {
        "retrieved from cache"
    } else {
        "computed from dataset"
    }
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!(
        "Unknown route: {}. Valid routes: /health, /insights, /recipes, /charts \
         (also under /api as health, get-insights, get-recipes, get-charts)",
        uri.path()
    ))
}
