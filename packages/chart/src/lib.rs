#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pure builders for the bike-share chart specifications.
//!
//! Each chart is a function of the [`TripTable`] alone: no I/O, no shared
//! state, and the same table always yields the same [`ChartSpec`]. Linked
//! views communicate only through named selection params declared in one
//! view and referenced by filter transforms or conditional encodings in
//! another; the browser-side runtime evaluates them.
//!
//! Every predicate that references a selection lets all rows through while
//! the selection is empty, for point and interval selections alike.

pub mod duration_explorer;
pub mod interactive_legend;
mod linked;
pub mod map_histogram;
pub mod scatter_bar;

use bike_viz_chart_models::ChartSpec;
use bike_viz_trip_models::{TripField, TripTable};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Name of the inline dataset every view reads from.
pub const TRIPS_DATASET: &str = "trips";

/// Errors that can occur while building a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The table lacks a column the chart encodes.
    #[error("Chart '{chart}' requires column '{field}', which the dataset does not carry")]
    SchemaMismatch {
        /// The chart being built.
        chart: ChartKind,
        /// The absent column.
        field: TripField,
    },

    /// A record could not be converted into an inline dataset row.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The available visualizations.
///
/// The kebab-case string form is the URL slug under `/viz/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ChartKind {
    /// Temperature scatter brushing a trips-per-city bar chart.
    ScatterBar,
    /// Country bar chart acting as a clickable legend for a scatter.
    InteractiveLegend,
    /// Duration scatter brushing a trips-per-city bar chart.
    DurationExplorer,
    /// World map brushing a trip-duration histogram.
    MapHistogram,
}

impl ChartKind {
    /// Every chart, in navigation order.
    pub const ALL: &[Self] = &[
        Self::ScatterBar,
        Self::InteractiveLegend,
        Self::DurationExplorer,
        Self::MapHistogram,
    ];

    /// Page title shown above the chart.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ScatterBar => "Bike Usage: Temperature vs. Trips (Linked Scatter & Bar)",
            Self::InteractiveLegend => "Bike Usage: Duration vs. Trips (Interactive Legend)",
            Self::DurationExplorer => {
                "Bike Usage: Duration/Trips Explorer (Linked to City Totals)"
            }
            Self::MapHistogram => "Bike Usage: Geospatial Map linked to Duration Histogram",
        }
    }

    /// Short label for navigation links.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ScatterBar => "Temperature vs. Trips",
            Self::InteractiveLegend => "Interactive Country Legend",
            Self::DurationExplorer => "Duration Explorer",
            Self::MapHistogram => "Map & Duration Histogram",
        }
    }

    /// Request path of the chart page.
    #[must_use]
    pub fn path(self) -> String {
        format!("/viz/{self}")
    }

    /// Columns the chart encodes.
    #[must_use]
    pub const fn required_fields(self) -> &'static [TripField] {
        match self {
            Self::ScatterBar => scatter_bar::REQUIRED_FIELDS,
            Self::InteractiveLegend => interactive_legend::REQUIRED_FIELDS,
            Self::DurationExplorer => duration_explorer::REQUIRED_FIELDS,
            Self::MapHistogram => map_histogram::REQUIRED_FIELDS,
        }
    }

    /// Builds this chart over `table`.
    ///
    /// # Errors
    ///
    /// * [`ChartError::SchemaMismatch`] if `table` lacks a required column
    /// * [`ChartError::Json`] if a record cannot be inlined
    pub fn build(self, table: &TripTable) -> Result<ChartSpec, ChartError> {
        let spec = match self {
            Self::ScatterBar => scatter_bar::build(table)?,
            Self::InteractiveLegend => interactive_legend::build(table)?,
            Self::DurationExplorer => duration_explorer::build(table)?,
            Self::MapHistogram => map_histogram::build(table)?,
        };
        log::debug!("Built '{self}' spec over {} records", table.len());
        Ok(spec)
    }
}

/// Fails with [`ChartError::SchemaMismatch`] unless `table` carries every
/// column `chart` needs.
fn require_fields(chart: ChartKind, table: &TripTable) -> Result<(), ChartError> {
    match table.first_missing(chart.required_fields()) {
        Some(field) => Err(ChartError::SchemaMismatch { chart, field }),
        None => Ok(()),
    }
}

/// Converts every record into an inline dataset row.
fn trip_rows(table: &TripTable) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    table.records().iter().map(serde_json::to_value).collect()
}
