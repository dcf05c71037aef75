//! Duration scatter whose brush filters a trips-per-city bar chart.
//!
//! Same linking as [`crate::scatter_bar`], keyed on average trip duration
//! with the brushed axis clamped to one hour.

use bike_viz_chart_models::ChartSpec;
use bike_viz_trip_models::{TripField, TripTable};

use crate::linked::{BrushedMeasure, scatter_with_city_totals};
use crate::{ChartError, ChartKind, require_fields};

/// Interval selection over the duration axis.
pub const BRUSH: &str = "duration_brush";

/// Duration axis domain in minutes.
pub const DURATION_DOMAIN: (f64, f64) = (0.0, 60.0);

pub const REQUIRED_FIELDS: &[TripField] = &[
    TripField::City,
    TripField::Month,
    TripField::Country,
    TripField::NumTrips,
    TripField::AvgDurationMinutes,
];

/// Builds the linked duration scatter and city bar chart.
///
/// # Errors
///
/// Returns [`ChartError::SchemaMismatch`] if `table` lacks a column in
/// [`REQUIRED_FIELDS`].
pub fn build(table: &TripTable) -> Result<ChartSpec, ChartError> {
    require_fields(ChartKind::DurationExplorer, table)?;

    Ok(scatter_with_city_totals(
        table,
        &BrushedMeasure {
            brush: BRUSH,
            field: TripField::AvgDurationMinutes,
            axis_title: "Average Trip Duration (min)",
            domain: Some(DURATION_DOMAIN),
            scatter_title: "Explore Trips by Duration and Count (Brush to Select)",
            bar_title: "Total Trips per City (Filtered by Selection)",
        },
    )?)
}

#[cfg(test)]
mod tests {
    use bike_viz_chart_models::Channel;

    use super::*;
    use crate::fixtures;

    #[test]
    fn bar_filter_references_scatter_brush() {
        let spec = build(&fixtures::sample()).unwrap();
        let scatter = fixtures::declaring(&spec, BRUSH);
        assert!(std::ptr::eq(scatter, &spec.views()[0]));
        assert_eq!(spec.views()[1].filter_params().collect::<Vec<_>>(), [BRUSH]);
    }

    #[test]
    fn clamps_brushed_axis_to_one_hour() {
        let spec = build(&fixtures::sample()).unwrap();
        let Some(Channel::Field(x)) = &spec.views()[0].encoding.as_ref().unwrap().x else {
            panic!("x is not a field");
        };
        assert_eq!(x.field.as_deref(), Some("Avg_Duration_Minutes"));
        assert_eq!(x.scale.unwrap().domain, Some([0.0, 60.0]));
    }

    #[test]
    fn does_not_need_temperature() {
        let table = fixtures::sample_without("Avg_Temperature_C");
        assert!(build(&table).is_ok());
    }
}
