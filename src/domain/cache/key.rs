//! Cache key naming

use std::borrow::Cow;

use crate::domain::charts::ChartKind;
use crate::domain::recipe::RecipeFilter;
use crate::domain::DomainError;

/// Builders for every key written by a processing run
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheKeys;

impl CacheKeys {
    pub const CLEANED_DATA: &'static str = "cleaned_data";
    pub const INSIGHTS_SUMMARY: &'static str = "insights:summary";
    pub const RECIPES_ALL: &'static str = "recipes:all";
    pub const METADATA: &'static str = "metadata";

    /// `charts:{bar_chart|heatmap|scatter_plot}`
    pub fn chart(kind: ChartKind) -> String {
        format!("charts:{}", kind.as_str())
    }

    /// Key holding the pre-filtered recipe list for `filter`
    ///
    /// Category values are escaped so a `:` inside a value cannot produce
    /// the key of a different filter.
    pub fn recipes(filter: &RecipeFilter) -> String {
        let diet = filter.diet_type.as_deref().map(escape_segment);
        let cuisine = filter.cuisine_type.as_deref().map(escape_segment);

        match (diet, cuisine) {
            (Some(diet), Some(cuisine)) => format!("recipes:diet:{}:cuisine:{}", diet, cuisine),
            (Some(diet), None) => format!("recipes:diet:{}", diet),
            (None, Some(cuisine)) => format!("recipes:cuisine:{}", cuisine),
            (None, None) => Self::RECIPES_ALL.to_string(),
        }
    }
}

/// Percent-encodes `%` and `:` in one key segment
fn escape_segment(value: &str) -> Cow<'_, str> {
    if value.contains(['%', ':']) {
        Cow::Owned(value.replace('%', "%25").replace(':', "%3A"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Compiles a `*` glob into an anchored regex
pub fn glob_regex(pattern: &str) -> Result<regex::Regex, DomainError> {
    let expr = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));

    regex::Regex::new(&expr).map_err(|e| DomainError::cache(format!("Invalid pattern: {}", e)))
}
