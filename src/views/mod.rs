//! View Projection
//!
//! Pure functions deriving what a dashboard shows from a [`Snapshot`]. Every
//! view is computed fresh from the snapshot it is given and never touches the
//! sampler.
//!
//! - [`latest_temperature`]: one location's latest value as text
//! - [`compare`]: which location is warmer at the latest reading
//! - [`table`]: the whole window as rows
//! - [`chart`]: line series per location, skipped on an empty history

mod chart;
mod error;
mod table;
mod text;

pub use chart::{chart, trend_line, ChartDataset, ChartSeries, TrendLine, CHART_TITLE};
pub use error::{ViewError, ViewResult};
pub use table::{table, Table, TableRow, TABLE_COLUMNS};
pub use text::{compare, format_temperature, latest_temperature, Comparison, Outcome};

use serde::Serialize;

use crate::sampler::{Location, Reading, Snapshot};

/// Every derived view of one snapshot, as pushed to live dashboards
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub sequence: u64,
    pub history_len: usize,
    pub capacity: usize,
    pub latest: Option<Reading>,
    pub arctic_text: Option<String>,
    pub antarctic_text: Option<String>,
    pub comparison: Option<Comparison>,
    pub comparison_text: Option<String>,
    pub table: Table,
    pub chart: Option<ChartSeries>,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let comparison = compare(snapshot);

        Self {
            sequence: snapshot.sequence,
            history_len: snapshot.len(),
            capacity: snapshot.capacity,
            latest: snapshot.latest().copied(),
            arctic_text: latest_temperature(snapshot, Location::Arctic),
            antarctic_text: latest_temperature(snapshot, Location::Antarctic),
            comparison_text: comparison.as_ref().map(Comparison::text),
            comparison,
            table: table(snapshot),
            chart: chart(snapshot),
        }
    }
}
