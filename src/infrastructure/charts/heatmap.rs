//! Diet by macronutrient heatmap

use std::collections::BTreeMap;

use plotters::prelude::*;

use super::canvas::{render_png, Canvas, DrawResult};
use crate::domain::analysis::MacroAverages;
use crate::domain::charts::ChartKind;
use crate::domain::DomainError;

const SIZE: (u32, u32) = (800, 600);
const COLUMNS: [&str; 3] = ["Protein", "Carbs", "Fat"];

const LOW: RGBColor = RGBColor(255, 255, 204);
const HIGH: RGBColor = RGBColor(189, 0, 38);

/// Linear blend between the low and high end of the colour scale
fn scale_color(value: f64, min: f64, max: f64) -> RGBColor {
    let t = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.5 };
    let mix = |lo: u8, hi: u8| (lo as f64 + (hi as f64 - lo as f64) * t).round() as u8;

    RGBColor(mix(LOW.0, HIGH.0), mix(LOW.1, HIGH.1), mix(LOW.2, HIGH.2))
}

/// Renders one row per diet and one column per macronutrient,
/// each cell annotated with its value to one decimal
pub fn render_heatmap(averages: &BTreeMap<String, MacroAverages>) -> Result<Vec<u8>, DomainError> {
    let kind = ChartKind::Heatmap;

    if averages.is_empty() {
        return Err(DomainError::render(kind.as_str(), "no diet groups to plot"));
    }

    render_png(kind, SIZE, |root| draw(root, averages))
}

fn draw(root: &Canvas<'_>, averages: &BTreeMap<String, MacroAverages>) -> DrawResult {
    let rows: Vec<(&str, [f64; 3])> = averages
        .iter()
        .map(|(diet, a)| (diet.as_str(), [a.protein_g, a.carbs_g, a.fat_g]))
        .collect();

    let all = rows.iter().flat_map(|(_, v)| v.iter().copied());
    let (min, max) = all.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let mut chart = ChartBuilder::on(root)
        .caption("Macronutrient Heatmap by Diet Type", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(100)
        .build_cartesian_2d(0f64..COLUMNS.len() as f64, 0f64..rows.len() as f64)?;

    let column_label = |x: &f64| centered_label(*x, &COLUMNS);
    let diet_names: Vec<&str> = rows.iter().map(|(diet, _)| *diet).collect();
    let row_label = |y: &f64| centered_label(*y, &diet_names);

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(COLUMNS.len() * 2 + 1)
        .y_labels(rows.len() * 2 + 1)
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .draw()?;

    let cells = rows.iter().enumerate().flat_map(|(r, (_, values))| {
        values.iter().enumerate().map(move |(c, v)| (c as f64, r as f64, *v))
    });

    chart.draw_series(cells.clone().map(|(x, y, v)| {
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], scale_color(v, min, max).filled())
    }))?;

    chart.draw_series(cells.map(|(x, y, v)| {
        Text::new(
            format!("{:.1}", v),
            (x + 0.4, y + 0.55),
            "sans-serif".into_font().resize(16.0),
        )
    }))?;

    Ok(())
}

fn centered_label(position: f64, names: &[&str]) -> String {
    let slot = position.floor();

    match names.get(slot as usize) {
        Some(name) if (position - slot - 0.5).abs() < 1e-6 => name.to_string(),
        _ => String::new(),
    }
}
