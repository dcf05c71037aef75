//! Temperature scatter whose brush filters a trips-per-city bar chart.

use bike_viz_chart_models::ChartSpec;
use bike_viz_trip_models::{TripField, TripTable};

use crate::linked::{BrushedMeasure, scatter_with_city_totals};
use crate::{ChartError, ChartKind, require_fields};

/// Interval selection over the temperature axis.
pub const BRUSH: &str = "temperature_brush";

pub const REQUIRED_FIELDS: &[TripField] = &[
    TripField::City,
    TripField::Month,
    TripField::Country,
    TripField::NumTrips,
    TripField::AvgTemperatureC,
];

/// Builds the linked temperature scatter and city bar chart.
///
/// # Errors
///
/// Returns [`ChartError::SchemaMismatch`] if `table` lacks a column in
/// [`REQUIRED_FIELDS`].
pub fn build(table: &TripTable) -> Result<ChartSpec, ChartError> {
    require_fields(ChartKind::ScatterBar, table)?;

    Ok(scatter_with_city_totals(
        table,
        &BrushedMeasure {
            brush: BRUSH,
            field: TripField::AvgTemperatureC,
            axis_title: "Avg. Temperature (°C)",
            domain: None,
            scatter_title: "Bike Trips vs. Temperature (Brush Temperature to Filter)",
            bar_title: "Trips per City (Filtered by Temperature Brush)",
        },
    )?)
}

#[cfg(test)]
mod tests {
    use bike_viz_chart_models::{
        Aggregate, Channel, Composition, SelectChannel, SelectionType, SortOrder,
    };

    use super::*;
    use crate::fixtures;

    #[test]
    fn stacks_scatter_above_bars() {
        let spec = build(&fixtures::sample()).unwrap();
        assert!(matches!(spec.composition, Composition::Vconcat(_)));
        assert_eq!(spec.views().len(), 2);
    }

    #[test]
    fn bar_filter_references_scatter_brush() {
        let spec = build(&fixtures::sample()).unwrap();
        let [scatter, bars] = spec.views() else {
            panic!("expected two views");
        };

        assert_eq!(scatter.declared_params().collect::<Vec<_>>(), [BRUSH]);
        assert_eq!(scatter.filter_params().count(), 0);
        assert_eq!(bars.filter_params().collect::<Vec<_>>(), [BRUSH]);
        assert!(std::ptr::eq(fixtures::declaring(&spec, BRUSH), scatter));
    }

    #[test]
    fn brush_covers_temperature_axis_only() {
        let spec = build(&fixtures::sample()).unwrap();
        let scatter = &spec.views()[0];
        let select = &scatter.params[0].select;
        assert_eq!(select.kind, SelectionType::Interval);
        assert_eq!(select.encodings, [SelectChannel::X]);

        let Some(Channel::Field(x)) = &scatter.encoding.as_ref().unwrap().x else {
            panic!("x is not a field");
        };
        assert_eq!(x.field.as_deref(), Some("Avg_Temperature_C"));
    }

    #[test]
    fn bars_sum_trips_per_city_descending() {
        let spec = build(&fixtures::sample()).unwrap();
        let encoding = spec.views()[1].encoding.as_ref().unwrap();

        let Some(Channel::Field(x)) = &encoding.x else {
            panic!("x is not a field");
        };
        assert_eq!(x.aggregate, Some(Aggregate::Sum));
        assert_eq!(x.field.as_deref(), Some("Num_Trips"));

        let Some(Channel::Field(y)) = &encoding.y else {
            panic!("y is not a field");
        };
        assert_eq!(y.field.as_deref(), Some("City"));
        let sort = y.sort.as_ref().unwrap();
        assert_eq!(sort.op, Aggregate::Sum);
        assert_eq!(sort.field, "Num_Trips");
        assert_eq!(sort.order, SortOrder::Descending);
    }

    #[test]
    fn requires_temperature_column() {
        let table = fixtures::sample_without("Avg_Temperature_C");
        assert!(matches!(
            build(&table),
            Err(ChartError::SchemaMismatch {
                field: TripField::AvgTemperatureC,
                ..
            })
        ));
    }
}
