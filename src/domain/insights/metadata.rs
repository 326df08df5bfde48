//! Processing run metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::recipe::{round2, Dataset};

pub const PROCESSING_VERSION: &str = "1.0.0";

/// Wall-clock seconds spent in each processing step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepTimes {
    pub data_cleaning_sec: f64,
    pub chart_generation_sec: f64,
    pub insights_calculation_sec: f64,
    pub recipe_caching_sec: f64,
    pub total_processing_sec: f64,
}

impl StepTimes {
    pub fn rounded(&self) -> Self {
        Self {
            data_cleaning_sec: round2(self.data_cleaning_sec),
            chart_generation_sec: round2(self.chart_generation_sec),
            insights_calculation_sec: round2(self.insights_calculation_sec),
            recipe_caching_sec: round2(self.recipe_caching_sec),
            total_processing_sec: round2(self.total_processing_sec),
        }
    }
}

/// Description of the last successful processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub last_processed: DateTime<Utc>,
    pub step_times: StepTimes,
    pub file_name: String,
    pub file_size: usize,
    pub total_recipes: usize,
    pub total_columns: usize,
    pub diet_types: Vec<String>,
    pub diet_types_count: usize,
    pub cuisine_types: Vec<String>,
    pub cuisines_count: usize,
    pub processing_version: String,
}

impl Metadata {
    pub fn new(
        dataset: &Dataset,
        file_name: impl Into<String>,
        file_size: usize,
        step_times: StepTimes,
    ) -> Self {
        let diet_types = dataset.diet_types();
        let cuisine_types = dataset.cuisine_types();

        Self {
            last_processed: Utc::now(),
            step_times: step_times.rounded(),
            file_name: file_name.into(),
            file_size,
            total_recipes: dataset.len(),
            total_columns: dataset.column_count(),
            diet_types_count: diet_types.len(),
            diet_types,
            cuisines_count: cuisine_types.len(),
            cuisine_types,
            processing_version: PROCESSING_VERSION.to_string(),
        }
    }
}

/// Whether a processing run has completed for the current data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataState {
    Unprocessed,
    Ready,
}

impl DataState {
    pub fn of(metadata: Option<&Metadata>) -> Self {
        match metadata {
            Some(_) => Self::Ready,
            None => Self::Unprocessed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unprocessed => "unprocessed",
            Self::Ready => "ready",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::Recipe;

    #[test]
    fn test_metadata_from_dataset() {
        let ds = Dataset::new(
            vec![
                Recipe::new("a", "keto", "thai", 1.0, 1.0, 1.0),
                Recipe::new("b", "vegan", "thai", 1.0, 1.0, 1.0),
                Recipe::new("c", "keto", "greek", 1.0, 1.0, 1.0),
            ],
            8,
        );
        let times = StepTimes {
            data_cleaning_sec: 0.123,
            total_processing_sec: 1.999,
            ..Default::default()
        };

        let metadata = Metadata::new(&ds, "All_Diets.csv", 2048, times);

        assert_eq!(metadata.total_recipes, 3);
        assert_eq!(metadata.total_columns, 8);
        assert_eq!(metadata.diet_types, vec!["keto", "vegan"]);
        assert_eq!(metadata.cuisines_count, 2);
        assert_eq!(metadata.step_times.data_cleaning_sec, 0.12);
        assert_eq!(metadata.step_times.total_processing_sec, 2.0);
        assert_eq!(metadata.processing_version, PROCESSING_VERSION);
    }

    #[test]
    fn test_data_state() {
        assert_eq!(DataState::of(None), DataState::Unprocessed);
        assert_eq!(DataState::Ready.as_str(), "ready");
        assert_eq!(
            serde_json::to_string(&DataState::Unprocessed).unwrap(),
            "\"unprocessed\""
        );
    }
}
