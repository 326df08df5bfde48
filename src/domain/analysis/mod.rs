//! Analysis domain - aggregations and the insights summary

pub mod aggregate;
pub mod insights;

pub use aggregate::{
    average_ratios, dataset_statistics, diet_distribution, diet_group_sizes,
    diet_with_highest_avg_protein, macronutrient_averages, most_common_cuisine_per_diet, ratios,
    top_n_by_protein, AverageRatios, DatasetStatistics, DietDistribution, MacroAverages, RatioRow,
    ValueRange, DEFAULT_TOP_N,
};
pub use insights::{build_insights, Analysis, InsightsSummary, KeyFindings, SummaryCounts};
