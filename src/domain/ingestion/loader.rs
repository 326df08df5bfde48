//! CSV ingestion and mean-fill cleaning

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::domain::recipe::{Dataset, Recipe};
use crate::domain::DomainError;

pub const DIET_TYPE_COLUMN: &str = "Diet_type";
pub const RECIPE_NAME_COLUMN: &str = "Recipe_name";
pub const CUISINE_TYPE_COLUMN: &str = "Cuisine_type";
pub const PROTEIN_COLUMN: &str = "Protein(g)";
pub const CARBS_COLUMN: &str = "Carbs(g)";
pub const FAT_COLUMN: &str = "Fat(g)";

/// Columns every input file must carry, in reporting order
pub const REQUIRED_COLUMNS: [&str; 6] = [
    DIET_TYPE_COLUMN,
    RECIPE_NAME_COLUMN,
    CUISINE_TYPE_COLUMN,
    PROTEIN_COLUMN,
    CARBS_COLUMN,
    FAT_COLUMN,
];

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    diet_type: usize,
    recipe_name: usize,
    cuisine_type: usize,
    protein: usize,
    carbs: usize,
    fat: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, DomainError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}'))
            .collect();
        let position = |column: &str| names.iter().position(|h| *h == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| position(c).is_none())
            .map(|c| c.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(DomainError::schema(missing));
        }

        let find = |column: &str| {
            position(column)
                .ok_or_else(|| DomainError::internal(format!("column '{}' vanished", column)))
        };

        Ok(Self {
            diet_type: find(DIET_TYPE_COLUMN)?,
            recipe_name: find(RECIPE_NAME_COLUMN)?,
            cuisine_type: find(CUISINE_TYPE_COLUMN)?,
            protein: find(PROTEIN_COLUMN)?,
            carbs: find(CARBS_COLUMN)?,
            fat: find(FAT_COLUMN)?,
        })
    }
}

/// Row as read from the file, before gaps are filled
#[derive(Debug)]
struct RawRow {
    name: Option<String>,
    diet_type: Option<String>,
    cuisine_type: Option<String>,
    macros: [Option<f64>; 3],
}

impl RawRow {
    fn from_record(record: &StringRecord, index: &ColumnIndex) -> Self {
        let text = |i: usize| {
            record
                .get(i)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let number = |i: usize| {
            record
                .get(i)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        Self {
            name: text(index.recipe_name),
            diet_type: text(index.diet_type),
            cuisine_type: text(index.cuisine_type),
            macros: [number(index.protein), number(index.carbs), number(index.fat)],
        }
    }
}

/// Parses recipe CSV bytes into a cleaned dataset
///
/// Missing numeric cells are replaced by their column mean over the
/// non-missing values of this load. Fails with `Schema` when required
/// columns are absent and with `DataIntegrity` when a gap cannot be filled.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, DomainError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DomainError::data_integrity(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let index = ColumnIndex::resolve(&headers)?;
    let column_count = headers.len();

    let mut rows = Vec::new();

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            DomainError::data_integrity(format!("Failed to read CSV row {}: {}", line + 1, e))
        })?;
        rows.push(RawRow::from_record(&record, &index));
    }

    info!(rows = rows.len(), columns = column_count, "Raw data loaded");

    let dataset = clean(rows, column_count)?;

    info!(rows = dataset.len(), "Data cleaned successfully");
    Ok(dataset)
}

fn clean(rows: Vec<RawRow>, column_count: usize) -> Result<Dataset, DomainError> {
    let means: Vec<Option<f64>> = (0..3).map(|col| column_mean(&rows, col)).collect();

    let filled: usize = rows
        .iter()
        .flat_map(|r| r.macros.iter())
        .filter(|v| v.is_none())
        .count();

    if filled > 0 {
        debug!(cells = filled, "Filling missing numeric values with column means");
    }

    let mut unresolved = 0usize;
    let mut recipes = Vec::with_capacity(rows.len());

    for row in rows {
        let macros: Vec<Option<f64>> = row
            .macros
            .iter()
            .zip(&means)
            .map(|(value, mean)| value.or(*mean))
            .collect();

        unresolved += macros.iter().filter(|v| v.is_none()).count();
        unresolved += [&row.name, &row.diet_type, &row.cuisine_type]
            .iter()
            .filter(|v| v.is_none())
            .count();

        if let (Some(name), Some(diet), Some(cuisine), [Some(p), Some(c), Some(f)]) = (
            row.name,
            row.diet_type,
            row.cuisine_type,
            macros.as_slice(),
        ) {
            recipes.push(Recipe::new(name, diet, cuisine, *p, *c, *f));
        }
    }

    if unresolved != 0 {
        return Err(DomainError::data_integrity(format!(
            "Data cleaning failed: {} null values remaining",
            unresolved
        )));
    }

    Ok(Dataset::new(recipes, column_count))
}

fn column_mean(rows: &[RawRow], column: usize) -> Option<f64> {
    let values: Vec<f64> = rows.iter().filter_map(|r| r.macros[column]).collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
