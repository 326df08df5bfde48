//! Chart domain - rendered chart identifiers and payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three charts produced for every dataset version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    BarChart,
    Heatmap,
    ScatterPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [Self::BarChart, Self::Heatmap, Self::ScatterPlot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BarChart => "bar_chart",
            Self::Heatmap => "heatmap",
            Self::ScatterPlot => "scatter_plot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base64-encoded PNG for each chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSet {
    pub bar_chart: String,
    pub heatmap: String,
    pub scatter_plot: String,
}

impl ChartSet {
    pub fn get(&self, kind: ChartKind) -> &str {
        match kind {
            ChartKind::BarChart => &self.bar_chart,
            ChartKind::Heatmap => &self.heatmap,
            ChartKind::ScatterPlot => &self.scatter_plot,
        }
    }

    /// Same charts as `data:` URIs ready for an `<img src>`
    pub fn to_data_uris(&self) -> Self {
        Self {
            bar_chart: png_data_uri(&self.bar_chart),
            heatmap: png_data_uri(&self.heatmap),
            scatter_plot: png_data_uri(&self.scatter_plot),
        }
    }
}

pub fn png_data_uri(base64_png: &str) -> String {
    format!("data:image/png;base64,{}", base64_png)
}
