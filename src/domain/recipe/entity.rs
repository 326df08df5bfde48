//! Recipe entity and its cached representation

use serde::{Deserialize, Serialize};

/// A single recipe row after cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub diet_type: String,
    pub cuisine_type: String,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        diet_type: impl Into<String>,
        cuisine_type: impl Into<String>,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> Self {
        Self {
            name: name.into(),
            diet_type: diet_type.into(),
            cuisine_type: cuisine_type.into(),
            protein_g,
            carbs_g,
            fat_g,
        }
    }
}

/// Recipe as served by the API and stored under the `recipes:*` keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub recipe_name: String,
    pub diet_type: String,
    pub cuisine_type: String,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl From<&Recipe> for RecipeRecord {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_name: recipe.name.clone(),
            diet_type: recipe.diet_type.clone(),
            cuisine_type: recipe.cuisine_type.clone(),
            protein_g: round2(recipe.protein_g),
            carbs_g: round2(recipe.carbs_g),
            fat_g: round2(recipe.fat_g),
        }
    }
}

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rounds_macros() {
        let recipe = Recipe::new("Chicken Soup", "paleo", "american", 10.456, 3.0, 1.004);
        let record = RecipeRecord::from(&recipe);

        assert_eq!(record.recipe_name, "Chicken Soup");
        assert_eq!(record.protein_g, 10.46);
        assert_eq!(record.carbs_g, 3.0);
        assert_eq!(record.fat_g, 1.0);
    }

    #[test]
    fn test_record_serialization_field_names() {
        let record = RecipeRecord::from(&Recipe::new("Veg Curry", "vegan", "indian", 8.0, 40.0, 9.5));
        let json = serde_json::to_string(&record).unwrap();

        assert!(json.contains("\"recipe_name\":\"Veg Curry\""));
        assert!(json.contains("\"cuisine_type\":\"indian\""));
        assert!(json.contains("\"fat_g\":9.5"));
    }
}
