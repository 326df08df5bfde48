//! Chart rendering with plotters into base64 PNG

mod bar;
mod canvas;
mod heatmap;
mod scatter;

pub use bar::render_bar_chart;
pub use heatmap::render_heatmap;
pub use scatter::render_scatter_plot;

use base64::{engine::general_purpose, Engine as _};
use tracing::info;

use crate::domain::analysis::Analysis;
use crate::domain::charts::ChartSet;
use crate::domain::DomainError;

/// Standard base64 with padding, ready for a `data:` URI
pub fn encode_base64(png: &[u8]) -> String {
    general_purpose::STANDARD.encode(png)
}

/// Renders the chart set on the blocking pool
pub async fn render_chart_set_blocking(analysis: Analysis) -> Result<ChartSet, DomainError> {
    run_blocking(move || render_chart_set(&analysis)).await
}

async fn run_blocking<F>(render: F) -> Result<ChartSet, DomainError>
where
    F: FnOnce() -> Result<ChartSet, DomainError> + Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| DomainError::render("charts", format!("rendering task failed: {}", e)))?
}

/// Renders all three charts for one analysis; the first failure aborts
pub fn render_chart_set(analysis: &Analysis) -> Result<ChartSet, DomainError> {
    let bar_chart = encode_base64(&render_bar_chart(&analysis.averages)?);
    info!(bytes = bar_chart.len(), "Generated bar chart");

    let heatmap = encode_base64(&render_heatmap(&analysis.averages)?);
    info!(bytes = heatmap.len(), "Generated heatmap");

    let scatter_plot = encode_base64(&render_scatter_plot(&analysis.top_recipes)?);
    info!(bytes = scatter_plot.len(), "Generated scatter plot");

    Ok(ChartSet {
        bar_chart,
        heatmap,
        scatter_plot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::{Dataset, Recipe};

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64(b"png"), "cG5n");
        assert_eq!(encode_base64(&[0x89, b'P', b'N', b'G']), "iVBORw==");
    }

    #[test]
    fn test_render_chart_set() {
        let ds = Dataset::new(
            vec![
                Recipe::new("Steak", "paleo", "american", 62.0, 0.0, 30.0),
                Recipe::new("Tofu", "vegan", "asian", 20.0, 5.0, 10.0),
            ],
            6,
        );

        let charts = render_chart_set(&Analysis::compute(&ds, 5)).unwrap();

        for encoded in [&charts.bar_chart, &charts.heatmap, &charts.scatter_plot] {
            let png = general_purpose::STANDARD.decode(encoded).unwrap();
            assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        }
    }

    #[tokio::test]
    async fn test_blocking_render_matches_direct() {
        let ds = Dataset::new(vec![Recipe::new("Tofu", "vegan", "asian", 20.0, 5.0, 10.0)], 6);
        let analysis = Analysis::compute(&ds, 5);

        let charts = render_chart_set_blocking(analysis.clone()).await.unwrap();

        assert_eq!(charts, render_chart_set(&analysis).unwrap());
    }

    #[tokio::test]
    async fn test_failed_rendering_task_is_render_error() {
        let err = run_blocking(|| -> Result<ChartSet, DomainError> { panic!("renderer crashed") })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Render { ref chart, .. } if chart == "charts"));
        assert!(err.to_string().starts_with("Failed to render charts: rendering task failed"));
    }

    #[test]
    fn test_empty_dataset_fails_on_first_chart() {
        let ds = Dataset::new(vec![], 6);

        let err = render_chart_set(&Analysis::compute(&ds, 5)).unwrap_err();

        assert!(matches!(err, DomainError::Render { ref chart, .. } if chart == "bar_chart"));
    }
}
