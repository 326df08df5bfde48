//! Grouped bar chart of mean macronutrients per diet

use std::collections::BTreeMap;

use plotters::prelude::*;

use super::canvas::{axis_ceiling, palette, render_png, Canvas, DrawResult};
use crate::domain::analysis::MacroAverages;
use crate::domain::charts::ChartKind;
use crate::domain::DomainError;

const SIZE: (u32, u32) = (1000, 600);
const MACROS: [&str; 3] = ["Protein", "Carbs", "Fat"];
const BAR_WIDTH: f64 = 0.25;

fn values(averages: &MacroAverages) -> [f64; 3] {
    [averages.protein_g, averages.carbs_g, averages.fat_g]
}

/// Renders protein, carbs and fat bars side by side for each diet type
pub fn render_bar_chart(averages: &BTreeMap<String, MacroAverages>) -> Result<Vec<u8>, DomainError> {
    let kind = ChartKind::BarChart;

    if averages.is_empty() {
        return Err(DomainError::render(kind.as_str(), "no diet groups to plot"));
    }

    render_png(kind, SIZE, |root| draw(root, averages))
}

fn draw(root: &Canvas<'_>, averages: &BTreeMap<String, MacroAverages>) -> DrawResult {
    let diets: Vec<&str> = averages.keys().map(String::as_str).collect();
    let max = averages
        .values()
        .flat_map(values)
        .fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(root)
        .caption("Average Macronutrient Content by Diet Type", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..diets.len() as f64, 0f64..axis_ceiling(max))?;

    let diet_label = |x: &f64| {
        let slot = x.floor();
        match diets.get(slot as usize) {
            Some(diet) if (x - slot - 0.5).abs() < 1e-6 => diet.to_string(),
            _ => String::new(),
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(diets.len() * 2 + 1)
        .x_label_formatter(&diet_label)
        .x_desc("Diet Type")
        .y_desc("Average Amount (g)")
        .draw()?;

    for (m, name) in MACROS.iter().enumerate() {
        let color = palette(m);
        let offset = 0.5 - 1.5 * BAR_WIDTH + m as f64 * BAR_WIDTH;

        let bars = averages.values().enumerate().map(move |(i, a)| {
            let x0 = i as f64 + offset;
            Rectangle::new([(x0, 0.0), (x0 + BAR_WIDTH * 0.9, values(a)[m])], color.filled())
        });

        chart
            .draw_series(bars)?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
