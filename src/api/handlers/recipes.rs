use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::origin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, EnvelopeBuilder, Query, RecipeQuery, SuccessResponse};
use crate::domain::recipe::{paginate, search_by_keyword, PageRequest, Pagination, RecipeRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterApplied {
    pub diet_type: Option<String>,
    pub cuisine_type: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipesData {
    pub recipes: Vec<RecipeRecord>,
    pub pagination: Pagination,
    pub filter_applied: FilterApplied,
}

/// Filtered recipe list with optional keyword search and pagination
///
/// Query parameters are validated before any lookup, so a bad page is a
/// 400 even when no data has been processed.
pub async fn get_recipes(
    State(state): State<AppState>,
    Query(query): Query<RecipeQuery>,
) -> Result<Json<SuccessResponse<RecipesData>>, ApiError> {
    let mut envelope = EnvelopeBuilder::start(state.provider.as_ref());

    let request = PageRequest::new(
        query.page,
        query.page_size,
        state.api.default_page_size,
        state.api.max_page_size,
    )?;
    let filter = query.filter();
    let keyword = query.keyword();

    let mut records = state.provider.recipes(&filter).await?;
    debug!(filter = %filter, count = records.len(), "Recipes looked up");

    if let Some(keyword) = keyword {
        let before = records.len();
        records = search_by_keyword(records, keyword);
        debug!(keyword, before, after = records.len(), "Keyword search applied");

        if records.is_empty() {
            warn!(keyword, filter = %filter, "No recipes match keyword");
            return Err(ApiError::not_found(format!(
                "No recipes found matching keyword '{}' in the selected category.",
                keyword
            )));
        }

        envelope =
            envelope.with_operations(format!("{} + keyword search", state.provider.operations()));
    }

    let page = paginate(records, request);
    let metadata = state.provider.metadata().await?;

    let mut description = filter.to_string();
    if let Some(keyword) = keyword {
        description.push_str(&format!(", keyword='{}'", keyword));
    }

    let filter_applied = FilterApplied {
        diet_type: filter.diet_type,
        cuisine_type: filter.cuisine_type,
        keyword: keyword.map(str::to_string),
    };

    let message = format!("Recipes {} for {}", origin(state.provider.as_ref()), description);
    let response = envelope.finish(
        RecipesData {
            recipes: page.items,
            pagination: page.pagination,
            filter_applied,
        },
        message,
        metadata.as_ref(),
    );

    info!(
        page = response.data.pagination.page,
        returned = response.data.recipes.len(),
        total = response.data.pagination.total_count,
        "Recipes served"
    );

    Ok(Json(response))
}
