//! Scatter plot of the top protein recipes by cuisine

use plotters::prelude::*;

use super::canvas::{axis_ceiling, palette, render_png, Canvas, DrawResult};
use crate::domain::charts::ChartKind;
use crate::domain::recipe::Recipe;
use crate::domain::DomainError;

const SIZE: (u32, u32) = (1000, 600);
const POINT_RADIUS: i32 = 6;

/// Distinct values in first-seen order
fn categories<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();

    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }

    seen
}

/// Renders protein content against cuisine, one colour per diet type
pub fn render_scatter_plot(top_recipes: &[Recipe]) -> Result<Vec<u8>, DomainError> {
    let kind = ChartKind::ScatterPlot;

    if top_recipes.is_empty() {
        return Err(DomainError::render(kind.as_str(), "no recipes to plot"));
    }

    render_png(kind, SIZE, |root| draw(root, top_recipes))
}

fn draw(root: &Canvas<'_>, recipes: &[Recipe]) -> DrawResult {
    let cuisines = categories(recipes.iter().map(|r| r.cuisine_type.as_str()));
    let diets = categories(recipes.iter().map(|r| r.diet_type.as_str()));
    let max = recipes.iter().map(|r| r.protein_g).fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption("Top Protein Recipes by Cuisine", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..cuisines.len() as f64, 0f64..axis_ceiling(max))?;

    let cuisine_label = |x: &f64| {
        let slot = x.floor();
        match cuisines.get(slot as usize) {
            Some(cuisine) if (x - slot - 0.5).abs() < 1e-6 => cuisine.to_string(),
            _ => String::new(),
        }
    };

    chart
        .configure_mesh()
        .x_labels(cuisines.len() * 2 + 1)
        .x_label_formatter(&cuisine_label)
        .x_desc("Cuisine Type")
        .y_desc("Protein (g)")
        .draw()?;

    // Spread diets horizontally inside a cuisine slot so points do not overlap
    let spread = 0.6 / diets.len() as f64;

    for (d, diet) in diets.iter().enumerate() {
        let color = palette(d);
        let shift = 0.2 + spread * (d as f64 + 0.5);

        let points = recipes
            .iter()
            .filter(|r| r.diet_type == *diet)
            .filter_map(|r| {
                let slot = cuisines.iter().position(|c| *c == r.cuisine_type)?;
                Some(Circle::new((slot as f64 + shift, r.protein_g), POINT_RADIUS, color.filled()))
            });

        chart
            .draw_series(points)?
            .label(*diet)
            .legend(move |(x, y)| Circle::new((x + 5, y), POINT_RADIUS, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
