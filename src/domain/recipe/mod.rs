//! Recipe domain - entities, dataset and listing queries

mod dataset;
mod entity;
mod query;

pub use dataset::Dataset;
pub use entity::{round2, Recipe, RecipeRecord};
pub use query::{
    paginate, search_by_keyword, Page, PageRequest, Pagination, RecipeFilter, DEFAULT_PAGE_SIZE,
};
