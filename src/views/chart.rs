//! Chart view
//!
//! One line series per location over the history window, plus a least-squares
//! trend line of the Antarctic series against sample index.

use serde::Serialize;

use crate::sampler::{Location, Snapshot};

/// Chart title shown by dashboards
pub const CHART_TITLE: &str = "Temperature Readings with Regression Line";

const ARCTIC_COLOR: &str = "#2196F3";
const ANTARCTIC_COLOR: &str = "#9C27B0";
const TREND_COLOR: &str = "#F44336";

/// Chart-ready series derived from a snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    /// X axis: reading timestamps, oldest first
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    /// Present when there are at least two readings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendLine>,
}

/// A single line series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub location: Location,
    pub data: Vec<f64>,
    pub color: String,
}

/// Least-squares fit `y = slope * index + intercept`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendLine {
    pub label: String,
    pub location: Location,
    pub slope: f64,
    pub intercept: f64,
    /// Fitted value at each label
    pub data: Vec<f64>,
    pub color: String,
}

/// Build the chart for a snapshot. Skipped entirely for an empty history.
pub fn chart(snapshot: &Snapshot) -> Option<ChartSeries> {
    if snapshot.is_empty() {
        return None;
    }

    let labels = snapshot
        .readings
        .iter()
        .map(|r| r.timestamp_label())
        .collect();

    let datasets = Location::all()
        .iter()
        .map(|&location| ChartDataset {
            label: location.label().to_string(),
            location,
            data: snapshot
                .readings
                .iter()
                .map(|r| r.temperature(location))
                .collect(),
            color: series_color(location).to_string(),
        })
        .collect::<Vec<_>>();

    let trend = datasets
        .iter()
        .find(|d| d.location == Location::Antarctic)
        .and_then(|d| trend_line(Location::Antarctic, &d.data));

    Some(ChartSeries {
        title: CHART_TITLE.to_string(),
        labels,
        datasets,
        trend,
    })
}

fn series_color(location: Location) -> &'static str {
    match location {
        Location::Arctic => ARCTIC_COLOR,
        Location::Antarctic => ANTARCTIC_COLOR,
    }
}

/// Fit a line through `values` indexed 0..n. Needs two or more points.
pub fn trend_line(location: Location, values: &[f64]) -> Option<TrendLine> {
    let (slope, intercept) = linear_regression(values)?;
    let data = (0..values.len())
        .map(|x| slope * x as f64 + intercept)
        .collect();

    Some(TrendLine {
        label: format!("{} Trend", location.label()),
        location,
        slope,
        intercept,
        data,
        color: TREND_COLOR.to_string(),
    })
}

/// Ordinary least squares over (index, value) pairs
fn linear_regression(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let (numerator, denominator) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (x, &y)| {
            let dx = x as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });

    let slope = numerator / denominator;
    Some((slope, y_mean - slope * x_mean))
}
