//! Grouped aggregations over a cleaned dataset
//!
//! Groups are keyed by diet type and iterate in lexicographic order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::recipe::{Dataset, Recipe};

pub const DEFAULT_TOP_N: usize = 5;

/// Mean macronutrients of one diet group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroAverages {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// A recipe with its derived ratios; `None` where the denominator is zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub recipe: Recipe,
    pub protein_to_carbs: Option<f64>,
    pub carbs_to_fat: Option<f64>,
}

/// Mean of the defined ratios within one diet group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageRatios {
    pub protein_to_carbs: Option<f64>,
    pub carbs_to_fat: Option<f64>,
}

/// Recipe counts per diet, largest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietDistribution {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// Min, max and mean of one macronutrient column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_rows: usize,
    pub total_columns: usize,
    pub diet_types: Vec<String>,
    pub cuisine_types: Vec<String>,
    pub protein_range: Option<ValueRange>,
    pub carbs_range: Option<ValueRange>,
    pub fat_range: Option<ValueRange>,
}

fn group_by_diet(dataset: &Dataset) -> BTreeMap<&str, Vec<&Recipe>> {
    let mut groups: BTreeMap<&str, Vec<&Recipe>> = BTreeMap::new();

    for recipe in dataset.recipes() {
        groups.entry(recipe.diet_type.as_str()).or_default().push(recipe);
    }

    groups
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Arithmetic mean of protein, carbs and fat per diet type
pub fn macronutrient_averages(dataset: &Dataset) -> BTreeMap<String, MacroAverages> {
    group_by_diet(dataset)
        .into_iter()
        .map(|(diet, rows)| {
            let n = rows.len() as f64;
            let averages = MacroAverages {
                protein_g: rows.iter().map(|r| r.protein_g).sum::<f64>() / n,
                carbs_g: rows.iter().map(|r| r.carbs_g).sum::<f64>() / n,
                fat_g: rows.iter().map(|r| r.fat_g).sum::<f64>() / n,
            };
            (diet.to_string(), averages)
        })
        .collect()
}

/// Recipe count per diet type
pub fn diet_group_sizes(dataset: &Dataset) -> BTreeMap<String, usize> {
    group_by_diet(dataset)
        .into_iter()
        .map(|(diet, rows)| (diet.to_string(), rows.len()))
        .collect()
}

/// Highest-protein recipes, at most `n` per diet type
///
/// All rows are stable-sorted by protein descending (ties keep source
/// order) and the first `n` of each diet are kept in that sorted order.
pub fn top_n_by_protein(dataset: &Dataset, n: usize) -> Vec<Recipe> {
    let mut sorted: Vec<&Recipe> = dataset.recipes().iter().collect();
    sorted.sort_by(|a, b| b.protein_g.total_cmp(&a.protein_g));

    let mut taken: BTreeMap<&str, usize> = BTreeMap::new();
    let mut top = Vec::new();

    for recipe in sorted {
        let count = taken.entry(recipe.diet_type.as_str()).or_insert(0);

        if *count < n {
            *count += 1;
            top.push(recipe.clone());
        }
    }

    top
}

/// Diet type with the highest mean protein
///
/// On an exact tie the lexicographically smallest diet type wins.
pub fn diet_with_highest_avg_protein(dataset: &Dataset) -> Option<String> {
    let mut best: Option<(String, f64)> = None;

    for (diet, averages) in macronutrient_averages(dataset) {
        let better = best
            .as_ref()
            .is_none_or(|(_, top)| averages.protein_g > *top);

        if better {
            best = Some((diet, averages.protein_g));
        }
    }

    best.map(|(diet, _)| diet)
}

/// Most frequent cuisine within each diet type
///
/// On a count tie the cuisine seen first in row order wins.
pub fn most_common_cuisine_per_diet(dataset: &Dataset) -> BTreeMap<String, String> {
    group_by_diet(dataset)
        .into_iter()
        .filter_map(|(diet, rows)| {
            let mut counts: Vec<(&str, usize)> = Vec::new();

            for recipe in rows {
                match counts.iter_mut().find(|(c, _)| *c == recipe.cuisine_type) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((recipe.cuisine_type.as_str(), 1)),
                }
            }

            let mut winner: Option<(&str, usize)> = None;

            for (cuisine, n) in counts {
                if winner.is_none_or(|(_, best)| n > best) {
                    winner = Some((cuisine, n));
                }
            }

            winner.map(|(cuisine, _)| (diet.to_string(), cuisine.to_string()))
        })
        .collect()
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Protein-to-carbs and carbs-to-fat ratio for every row
pub fn ratios(dataset: &Dataset) -> Vec<RatioRow> {
    dataset
        .recipes()
        .iter()
        .map(|r| RatioRow {
            recipe: r.clone(),
            protein_to_carbs: ratio(r.protein_g, r.carbs_g),
            carbs_to_fat: ratio(r.carbs_g, r.fat_g),
        })
        .collect()
}

/// Mean of the defined ratios per diet type; null ratios are skipped
pub fn average_ratios(rows: &[RatioRow]) -> BTreeMap<String, AverageRatios> {
    let mut groups: BTreeMap<&str, Vec<&RatioRow>> = BTreeMap::new();

    for row in rows {
        groups.entry(row.recipe.diet_type.as_str()).or_default().push(row);
    }

    groups
        .into_iter()
        .map(|(diet, rows)| {
            let averages = AverageRatios {
                protein_to_carbs: mean(rows.iter().filter_map(|r| r.protein_to_carbs)),
                carbs_to_fat: mean(rows.iter().filter_map(|r| r.carbs_to_fat)),
            };
            (diet.to_string(), averages)
        })
        .collect()
}

/// Recipe counts per diet, ordered by count descending then name
pub fn diet_distribution(dataset: &Dataset) -> DietDistribution {
    let mut counts: Vec<(String, usize)> = diet_group_sizes(dataset).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let (labels, values) = counts.into_iter().unzip();
    DietDistribution { labels, values }
}

fn value_range(values: impl Iterator<Item = f64> + Clone) -> Option<ValueRange> {
    let mean = mean(values.clone())?;
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.fold(f64::NEG_INFINITY, f64::max);

    Some(ValueRange { min, max, mean })
}

/// Size, categories and macronutrient ranges of the dataset
pub fn dataset_statistics(dataset: &Dataset) -> DatasetStatistics {
    let recipes = dataset.recipes();

    DatasetStatistics {
        total_rows: dataset.len(),
        total_columns: dataset.column_count(),
        diet_types: dataset.diet_types(),
        cuisine_types: dataset.cuisine_types(),
        protein_range: value_range(recipes.iter().map(|r| r.protein_g)),
        carbs_range: value_range(recipes.iter().map(|r| r.carbs_g)),
        fat_range: value_range(recipes.iter().map(|r| r.fat_g)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, diet: &str, cuisine: &str, protein: f64) -> Recipe {
        Recipe::new(name, diet, cuisine, protein, 10.0, 5.0)
    }

    fn dataset(recipes: Vec<Recipe>) -> Dataset {
        Dataset::new(recipes, 6)
    }

    #[test]
    fn test_averages_three_row_example() {
        let ds = dataset(vec![
            recipe("r1", "A", "x", 10.0),
            recipe("r2", "B", "x", 20.0),
            recipe("r3", "A", "x", 30.0),
        ]);

        let averages = macronutrient_averages(&ds);

        assert_eq!(averages["A"].protein_g, 20.0);
        assert_eq!(averages["B"].protein_g, 20.0);
        assert_eq!(averages["A"].carbs_g, 10.0);
    }

    #[test]
    fn test_averages_partition_input() {
        let ds = dataset(vec![
            recipe("r1", "keto", "x", 1.0),
            recipe("r2", "vegan", "x", 2.0),
            recipe("r3", "keto", "y", 3.0),
            recipe("r4", "paleo", "y", 4.0),
            recipe("r5", "vegan", "z", 5.0),
        ]);

        let averages = macronutrient_averages(&ds);
        let sizes = diet_group_sizes(&ds);

        assert_eq!(averages.keys().collect::<Vec<_>>(), vec!["keto", "paleo", "vegan"]);
        assert_eq!(sizes.values().sum::<usize>(), ds.len());
    }

    #[test]
    fn test_top_n_limits_and_orders_per_group() {
        let mut rows = Vec::new();
        for i in 0..8 {
            rows.push(recipe(&format!("k{i}"), "keto", "x", i as f64));
        }
        rows.push(recipe("v0", "vegan", "x", 100.0));
        let ds = dataset(rows);

        let top = top_n_by_protein(&ds, 5);

        let keto: Vec<&Recipe> = top.iter().filter(|r| r.diet_type == "keto").collect();
        assert_eq!(keto.len(), 5);
        assert_eq!(top[0].name, "v0");

        let min_kept = keto.iter().map(|r| r.protein_g).fold(f64::INFINITY, f64::min);
        let max_excluded = ds
            .recipes()
            .iter()
            .filter(|r| r.diet_type == "keto" && !keto.iter().any(|k| k.name == r.name))
            .map(|r| r.protein_g)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(min_kept >= max_excluded);
    }

    #[test]
    fn test_top_n_ties_keep_row_order() {
        let ds = dataset(vec![
            recipe("first", "keto", "x", 10.0),
            recipe("second", "keto", "x", 10.0),
            recipe("third", "keto", "x", 10.0),
        ]);

        let top = top_n_by_protein(&ds, 2);

        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_highest_avg_protein() {
        let ds = dataset(vec![
            recipe("r1", "keto", "x", 30.0),
            recipe("r2", "vegan", "x", 10.0),
        ]);

        assert_eq!(diet_with_highest_avg_protein(&ds), Some("keto".to_string()));
        assert_eq!(diet_with_highest_avg_protein(&dataset(vec![])), None);
    }

    #[test]
    fn test_highest_avg_protein_tie_prefers_smallest_name() {
        let ds = dataset(vec![
            recipe("r1", "zone", "x", 20.0),
            recipe("r2", "atkins", "x", 20.0),
        ]);

        assert_eq!(diet_with_highest_avg_protein(&ds), Some("atkins".to_string()));
    }

    #[test]
    fn test_most_common_cuisine() {
        let ds = dataset(vec![
            recipe("r1", "keto", "italian", 1.0),
            recipe("r2", "keto", "mexican", 1.0),
            recipe("r3", "keto", "mexican", 1.0),
            recipe("r4", "vegan", "indian", 1.0),
        ]);

        let common = most_common_cuisine_per_diet(&ds);

        assert_eq!(common["keto"], "mexican");
        assert_eq!(common["vegan"], "indian");
    }

    #[test]
    fn test_most_common_cuisine_tie_prefers_first_seen() {
        let ds = dataset(vec![
            recipe("r1", "keto", "thai", 1.0),
            recipe("r2", "keto", "american", 1.0),
            recipe("r3", "keto", "american", 1.0),
            recipe("r4", "keto", "thai", 1.0),
        ]);

        assert_eq!(most_common_cuisine_per_diet(&ds)["keto"], "thai");
    }

    #[test]
    fn test_ratios_null_exactly_on_zero_denominator() {
        let ds = dataset(vec![
            Recipe::new("a", "keto", "x", 10.0, 4.0, 2.0),
            Recipe::new("b", "keto", "x", 10.0, 0.0, 2.0),
            Recipe::new("c", "keto", "x", 10.0, 4.0, 0.0),
        ]);

        let rows = ratios(&ds);

        assert_eq!(rows[0].protein_to_carbs, Some(2.5));
        assert_eq!(rows[0].carbs_to_fat, Some(2.0));
        assert_eq!(rows[1].protein_to_carbs, None);
        assert_eq!(rows[1].carbs_to_fat, Some(0.0));
        assert_eq!(rows[2].protein_to_carbs, Some(2.5));
        assert_eq!(rows[2].carbs_to_fat, None);
    }

    #[test]
    fn test_average_ratios_skip_nulls() {
        let ds = dataset(vec![
            Recipe::new("a", "keto", "x", 10.0, 5.0, 1.0),
            Recipe::new("b", "keto", "x", 10.0, 0.0, 1.0),
            Recipe::new("c", "vegan", "x", 1.0, 0.0, 0.0),
        ]);

        let averages = average_ratios(&ratios(&ds));

        assert_eq!(averages["keto"].protein_to_carbs, Some(2.0));
        assert_eq!(averages["keto"].carbs_to_fat, Some(2.5));
        assert_eq!(averages["vegan"].protein_to_carbs, None);
        assert_eq!(averages["vegan"].carbs_to_fat, None);
    }

    #[test]
    fn test_diet_distribution_order() {
        let ds = dataset(vec![
            recipe("r1", "vegan", "x", 1.0),
            recipe("r2", "keto", "x", 1.0),
            recipe("r3", "paleo", "x", 1.0),
            recipe("r4", "paleo", "x", 1.0),
        ]);

        let distribution = diet_distribution(&ds);

        assert_eq!(distribution.labels, vec!["paleo", "keto", "vegan"]);
        assert_eq!(distribution.values, vec![2, 1, 1]);
    }

    #[test]
    fn test_dataset_statistics_ranges() {
        let ds = dataset(vec![
            recipe("r1", "keto", "x", 2.0),
            recipe("r2", "vegan", "y", 6.0),
        ]);

        let stats = dataset_statistics(&ds);

        assert_eq!(stats.total_rows, 2);
        assert_eq!(stats.total_columns, 6);
        assert_eq!(stats.cuisine_types, vec!["x", "y"]);
        assert_eq!(
            stats.protein_range,
            Some(ValueRange { min: 2.0, max: 6.0, mean: 4.0 })
        );
        assert!(dataset_statistics(&dataset(vec![])).fat_range.is_none());
    }
}
