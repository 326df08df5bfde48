//! Recipe filtering, keyword search and pagination

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Recipe, RecipeRecord};
use crate::domain::DomainError;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Exact-match filter on diet and cuisine
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
}

impl RecipeFilter {
    /// Creates an empty filter matching every recipe
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diet_type(mut self, diet_type: impl Into<String>) -> Self {
        self.diet_type = Some(diet_type.into());
        self
    }

    pub fn with_cuisine_type(mut self, cuisine_type: impl Into<String>) -> Self {
        self.cuisine_type = Some(cuisine_type.into());
        self
    }

    /// Builds a filter from optional query values, treating blanks as absent
    pub fn from_options(diet_type: Option<String>, cuisine_type: Option<String>) -> Self {
        Self {
            diet_type: diet_type.filter(|v| !v.trim().is_empty()),
            cuisine_type: cuisine_type.filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.diet_type.is_none() && self.cuisine_type.is_none()
    }

    pub fn is_combination(&self) -> bool {
        self.diet_type.is_some() && self.cuisine_type.is_some()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let diet_ok = self
            .diet_type
            .as_deref()
            .is_none_or(|d| d == recipe.diet_type);
        let cuisine_ok = self
            .cuisine_type
            .as_deref()
            .is_none_or(|c| c == recipe.cuisine_type);

        diet_ok && cuisine_ok
    }
}

impl fmt::Display for RecipeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.diet_type, &self.cuisine_type) {
            (Some(d), Some(c)) => write!(f, "diet_type={}, cuisine_type={}", d, c),
            (Some(d), None) => write!(f, "diet_type={}", d),
            (None, Some(c)) => write!(f, "cuisine_type={}", c),
            (None, None) => write!(f, "no filter (all recipes)"),
        }
    }
}

/// Keeps records whose name contains `keyword`, ignoring case
pub fn search_by_keyword(records: Vec<RecipeRecord>, keyword: &str) -> Vec<RecipeRecord> {
    let needle = keyword.to_lowercase();

    records
        .into_iter()
        .filter(|r| r.recipe_name.to_lowercase().contains(&needle))
        .collect()
}

/// 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validates raw query values against the configured maximum page size
    pub fn new(
        page: Option<i64>,
        page_size: Option<i64>,
        default_page_size: usize,
        max_page_size: usize,
    ) -> Result<Self, DomainError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(default_page_size as i64);

        if page < 1 {
            return Err(DomainError::validation("page must be 1 or greater"));
        }

        if page_size < 1 || page_size > max_page_size as i64 {
            return Err(DomainError::validation(format!(
                "page_size must be between 1 and {}",
                max_page_size
            )));
        }

        Ok(Self {
            page: page as usize,
            page_size: page_size as usize,
        })
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Pagination block returned with every recipe page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A page of items with its pagination block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slices `items` for the requested page; out-of-range pages are empty
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_count = items.len();
    let offset = request.offset();
    let end = offset.saturating_add(request.page_size);

    let page_items: Vec<T> = items
        .into_iter()
        .skip(offset)
        .take(request.page_size)
        .collect();

    Page {
        items: page_items,
        pagination: Pagination {
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages: total_count.div_ceil(request.page_size),
            has_next: end < total_count,
            has_prev: request.page > 1,
        },
    }
}
