//! Cleaned recipe dataset

use serde::{Deserialize, Serialize};

use super::entity::Recipe;
use super::query::RecipeFilter;

/// Ordered collection of cleaned recipes
///
/// Rows keep their source order; every numeric field is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    recipes: Vec<Recipe>,
    column_count: usize,
}

impl Dataset {
    /// Creates a dataset from cleaned rows and the number of source columns
    pub fn new(recipes: Vec<Recipe>, column_count: usize) -> Self {
        Self {
            recipes,
            column_count,
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Number of columns in the source file, including ignored extras
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Distinct diet types in first-seen order
    pub fn diet_types(&self) -> Vec<String> {
        distinct(self.recipes.iter().map(|r| r.diet_type.as_str()))
    }

    /// Distinct cuisine types in first-seen order
    pub fn cuisine_types(&self) -> Vec<String> {
        distinct(self.recipes.iter().map(|r| r.cuisine_type.as_str()))
    }

    /// Distinct (diet, cuisine) pairs in first-seen order
    pub fn diet_cuisine_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        for recipe in &self.recipes {
            let seen = pairs
                .iter()
                .any(|(d, c)| *d == recipe.diet_type && *c == recipe.cuisine_type);

            if !seen {
                pairs.push((recipe.diet_type.clone(), recipe.cuisine_type.clone()));
            }
        }

        pairs
    }

    /// Rows matching the filter, in dataset order
    pub fn filter(&self, filter: &RecipeFilter) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| filter.matches(r)).collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }

    out
}
