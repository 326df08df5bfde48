//! Insights summary served by the insights endpoint

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::aggregate::{
    average_ratios, dataset_statistics, diet_distribution, diet_with_highest_avg_protein,
    macronutrient_averages, most_common_cuisine_per_diet, ratios, top_n_by_protein,
    AverageRatios, DatasetStatistics, DietDistribution, MacroAverages,
};
use crate::domain::recipe::{round2, Dataset, Recipe, RecipeRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub total_recipes_analyzed: usize,
    pub diet_types_count: usize,
    pub cuisines_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFindings {
    pub protein_leader: String,
    pub most_recipes_analyzed: usize,
    pub analysis_complete: bool,
}

/// Precomputed analysis results for one dataset version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub summary: SummaryCounts,
    pub average_macronutrients: BTreeMap<String, MacroAverages>,
    pub highest_protein_diet: Option<String>,
    #[serde(rename = "top_5_protein_recipes")]
    pub top_protein_recipes: Vec<RecipeRecord>,
    pub most_common_cuisines: BTreeMap<String, String>,
    pub average_ratios: BTreeMap<String, AverageRatios>,
    pub diet_distribution: DietDistribution,
    pub data_statistics: DatasetStatistics,
    pub key_findings: KeyFindings,
}

/// Everything the chart renderer and insights summary need from one pass
#[derive(Debug, Clone)]
pub struct Analysis {
    pub averages: BTreeMap<String, MacroAverages>,
    pub top_recipes: Vec<Recipe>,
}

impl Analysis {
    pub fn compute(dataset: &Dataset, top_n: usize) -> Self {
        let averages = macronutrient_averages(dataset);
        info!(diet_types = averages.len(), "Calculated average macronutrients");

        let top_recipes = top_n_by_protein(dataset, top_n);
        info!(recipes = top_recipes.len(), "Found top protein recipes");

        Self {
            averages,
            top_recipes,
        }
    }
}

fn round_averages(averages: &BTreeMap<String, MacroAverages>) -> BTreeMap<String, MacroAverages> {
    averages
        .iter()
        .map(|(diet, a)| {
            let rounded = MacroAverages {
                protein_g: round2(a.protein_g),
                carbs_g: round2(a.carbs_g),
                fat_g: round2(a.fat_g),
            };
            (diet.clone(), rounded)
        })
        .collect()
}

/// Compiles the insights summary from a dataset and its precomputed analysis
pub fn build_insights(dataset: &Dataset, analysis: &Analysis) -> InsightsSummary {
    let highest_protein_diet = diet_with_highest_avg_protein(dataset);
    info!(diet = ?highest_protein_diet, "Calculated highest protein diet");

    let most_common_cuisines = most_common_cuisine_per_diet(dataset);
    let ratio_rows = ratios(dataset);

    let average_ratios = average_ratios(&ratio_rows)
        .into_iter()
        .map(|(diet, r)| {
            let rounded = AverageRatios {
                protein_to_carbs: r.protein_to_carbs.map(round2),
                carbs_to_fat: r.carbs_to_fat.map(round2),
            };
            (diet, rounded)
        })
        .collect();

    let top_protein_recipes: Vec<RecipeRecord> =
        analysis.top_recipes.iter().map(RecipeRecord::from).collect();

    let protein_leader = match &highest_protein_diet {
        Some(diet) => format!("{} has the highest average protein content", diet),
        None => "No recipes analyzed".to_string(),
    };

    InsightsSummary {
        summary: SummaryCounts {
            total_recipes_analyzed: dataset.len(),
            diet_types_count: dataset.diet_types().len(),
            cuisines_count: dataset.cuisine_types().len(),
        },
        average_macronutrients: round_averages(&analysis.averages),
        highest_protein_diet,
        key_findings: KeyFindings {
            protein_leader,
            most_recipes_analyzed: top_protein_recipes.len(),
            analysis_complete: true,
        },
        top_protein_recipes,
        most_common_cuisines,
        average_ratios,
        diet_distribution: diet_distribution(dataset),
        data_statistics: dataset_statistics(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Recipe::new("Steak", "paleo", "american", 50.123, 2.0, 20.0),
                Recipe::new("Tofu Bowl", "vegan", "asian", 15.0, 40.0, 8.0),
                Recipe::new("Egg Salad", "paleo", "american", 20.0, 0.0, 10.0),
                Recipe::new("Lentil Soup", "vegan", "indian", 18.0, 30.0, 3.0),
            ],
            6,
        )
    }

    #[test]
    fn test_build_insights_summary() {
        let ds = dataset();
        let analysis = Analysis::compute(&ds, 5);

        let insights = build_insights(&ds, &analysis);

        assert_eq!(insights.summary.total_recipes_analyzed, 4);
        assert_eq!(insights.summary.diet_types_count, 2);
        assert_eq!(insights.summary.cuisines_count, 3);
        assert_eq!(insights.highest_protein_diet.as_deref(), Some("paleo"));
        assert_eq!(insights.average_macronutrients["paleo"].protein_g, 35.06);
        assert_eq!(insights.most_common_cuisines["vegan"], "asian");
        assert_eq!(insights.top_protein_recipes[0].recipe_name, "Steak");
        assert_eq!(insights.top_protein_recipes[0].protein_g, 50.12);
        assert_eq!(insights.key_findings.most_recipes_analyzed, 4);
        assert_eq!(
            insights.key_findings.protein_leader,
            "paleo has the highest average protein content"
        );
    }

    #[test]
    fn test_average_ratios_rounded() {
        let ds = dataset();
        let insights = build_insights(&ds, &Analysis::compute(&ds, 5));

        // Egg Salad has zero carbs, so only Steak contributes to paleo protein/carbs
        assert_eq!(insights.average_ratios["paleo"].protein_to_carbs, Some(25.06));
        assert_eq!(insights.average_ratios["vegan"].carbs_to_fat, Some(7.5));
    }

    #[test]
    fn test_insights_json_shape() {
        let ds = dataset();
        let insights = build_insights(&ds, &Analysis::compute(&ds, 1));

        let json = serde_json::to_value(&insights).unwrap();

        assert_eq!(json["summary"]["total_recipes_analyzed"], 4);
        assert_eq!(json["top_5_protein_recipes"].as_array().unwrap().len(), 2);
        assert!(json.get("top_protein_recipes").is_none());
        assert!(json["average_ratios"]["paleo"]["carbs_to_fat"].is_number());
        assert_eq!(json["diet_distribution"]["labels"][0], "paleo");
    }
}
