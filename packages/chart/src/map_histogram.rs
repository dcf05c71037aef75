//! World map of city trip volumes whose longitude brush filters a
//! trip-duration histogram.
//!
//! The histogram is drawn twice on the same axes: the full distribution as
//! a baseline, and the brushed subset as an overlay in a contrasting colour.

use bike_viz_chart_models::{
    Channel, ChartSpec, Composition, ConditionTarget, Data, Encoding, FieldDef, Mark, MarkType,
    Param, ParamPredicate, Projection, ProjectionType, SelectChannel, View,
};
use bike_viz_trip_models::{TripField, TripTable};

use crate::{ChartError, ChartKind, TRIPS_DATASET, require_fields, trip_rows};

/// Interval selection over the longitude channel.
pub const BRUSH: &str = "map_brush";

/// `TopoJSON` world outlines at 1:110m.
pub const WORLD_TOPOJSON_URL: &str =
    "https://cdn.jsdelivr.net/npm/vega-datasets@v1.29.0/data/world-110m.json";

pub const SELECTED_COLOR: &str = "red";
pub const BASELINE_COLOR: &str = "steelblue";

pub const HISTOGRAM_MAXBINS: u32 = 25;

pub const REQUIRED_FIELDS: &[TripField] = &[
    TripField::City,
    TripField::Month,
    TripField::NumTrips,
    TripField::AvgTemperatureC,
    TripField::AvgDurationMinutes,
    TripField::Latitude,
    TripField::Longitude,
];

/// Builds the brushable map beside the duration histogram.
///
/// # Errors
///
/// Returns [`ChartError::SchemaMismatch`] if `table` lacks a column in
/// [`REQUIRED_FIELDS`] (typically the coordinates).
pub fn build(table: &TripTable) -> Result<ChartSpec, ChartError> {
    require_fields(ChartKind::MapHistogram, table)?;

    let map = View::layered(vec![
        View::unit(Mark::new(MarkType::Geoshape).with_outline("transparent", "lightgray", 0.5))
            .with_data(Data::sphere()),
        View::unit(Mark::new(MarkType::Geoshape).with_outline("lightgray", "white", 0.2))
            .with_data(Data::topojson(WORLD_TOPOJSON_URL, "countries")),
        city_points(),
    ])
    .with_projection(Projection {
        kind: ProjectionType::NaturalEarth1,
    })
    .with_title("Global Bike Usage (Brush Longitude to Filter Histogram)")
    .with_size(600, 400);

    let histogram = View::layered(vec![
        duration_histogram(BASELINE_COLOR),
        duration_histogram(SELECTED_COLOR).with_filter(ParamPredicate::all_when_empty(BRUSH)),
    ])
    .with_title("Trip Duration Distribution")
    .with_size(250, 350);

    Ok(ChartSpec::new(Composition::Hconcat(vec![map, histogram]))
        .with_dataset(TRIPS_DATASET, trip_rows(table)?))
}

/// One circle per record, sized by trips, red inside the brush.
fn city_points() -> View {
    View::unit(Mark::new(MarkType::Circle).with_opacity(0.6).with_size(50))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(Encoding {
            longitude: Some(FieldDef::quantitative(TripField::Longitude.name()).into()),
            latitude: Some(FieldDef::quantitative(TripField::Latitude.name()).into()),
            color: Some(Channel::when(
                ParamPredicate::all_when_empty(BRUSH),
                ConditionTarget::value(SELECTED_COLOR),
                BASELINE_COLOR,
            )),
            size: Some(
                FieldDef::quantitative(TripField::NumTrips.name())
                    .with_range(10.0, 800.0)
                    .with_legend_title("Num Trips (Size)")
                    .into(),
            ),
            tooltip: vec![
                FieldDef::nominal(TripField::City.name()),
                FieldDef::nominal(TripField::Month.name()),
                FieldDef::quantitative(TripField::NumTrips.name()),
                FieldDef::quantitative(TripField::AvgTemperatureC.name())
                    .with_title("Avg Temp (°C)"),
                FieldDef::quantitative(TripField::AvgDurationMinutes.name())
                    .with_title("Avg Duration (min)"),
            ],
            ..Encoding::default()
        })
        .with_param(Param::interval(BRUSH, &[SelectChannel::Longitude]))
}

fn duration_histogram(color: &str) -> View {
    View::unit(Mark::new(MarkType::Bar))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(Encoding {
            x: Some(
                FieldDef::quantitative(TripField::AvgDurationMinutes.name())
                    .with_maxbins(HISTOGRAM_MAXBINS)
                    .with_title("Avg. Trip Duration (min)")
                    .with_domain(0.0, 60.0)
                    .into(),
            ),
            y: Some(FieldDef::count().with_title("Number of Records").into()),
            color: Some(Channel::value(color)),
            ..Encoding::default()
        })
}

#[cfg(test)]
mod tests {
    use bike_viz_chart_models::{Aggregate, MarkType, SelectionType};

    use super::*;
    use crate::fixtures;

    fn histogram_layers(spec: &ChartSpec) -> Vec<&View> {
        spec.all_views()
            .into_iter()
            .filter(|v| v.mark.as_ref().is_some_and(|m| m.kind == MarkType::Bar))
            .collect()
    }

    #[test]
    fn draws_filtered_overlay_on_unfiltered_baseline() {
        let spec = build(&fixtures::sample()).unwrap();
        let layers = histogram_layers(&spec);
        assert_eq!(layers.len(), 2);

        let filtered: Vec<_> = layers
            .iter()
            .filter(|v| v.filter_params().any(|p| p == BRUSH))
            .collect();
        let unfiltered: Vec<_> = layers
            .iter()
            .filter(|v| v.transform.is_empty())
            .collect();
        assert_eq!(filtered.len(), 1);
        assert_eq!(unfiltered.len(), 1);

        let color = |v: &View| {
            serde_json::to_value(v.encoding.as_ref().unwrap().color.as_ref().unwrap()).unwrap()
        };
        assert_eq!(color(*filtered[0])["value"], SELECTED_COLOR);
        assert_eq!(color(*unfiltered[0])["value"], BASELINE_COLOR);
    }

    #[test]
    fn histogram_bins_duration_into_fixed_domain() {
        let spec = build(&fixtures::sample()).unwrap();
        for layer in histogram_layers(&spec) {
            let encoding = layer.encoding.as_ref().unwrap();
            let Some(Channel::Field(x)) = &encoding.x else {
                panic!("x is not a field");
            };
            assert_eq!(x.bin.unwrap().maxbins, 25);
            assert_eq!(x.scale.unwrap().domain, Some([0.0, 60.0]));
            let Some(Channel::Field(y)) = &encoding.y else {
                panic!("y is not a field");
            };
            assert_eq!(y.aggregate, Some(Aggregate::Count));
        }
    }

    #[test]
    fn brush_is_restricted_to_longitude() {
        let spec = build(&fixtures::sample()).unwrap();
        let points = fixtures::declaring(&spec, BRUSH);
        let select = &points.params[0].select;
        assert_eq!(select.kind, SelectionType::Interval);
        assert_eq!(select.encodings, [SelectChannel::Longitude]);

        let value = serde_json::to_value(points.encoding.as_ref().unwrap()).unwrap();
        assert_eq!(value["color"]["condition"]["param"], BRUSH);
        assert_eq!(value["color"]["condition"]["empty"], true);
        assert_eq!(value["color"]["condition"]["value"], SELECTED_COLOR);
        assert_eq!(value["color"]["value"], BASELINE_COLOR);
        assert_eq!(value["longitude"]["field"], "Longitude");
        assert_eq!(value["size"]["field"], "Num_Trips");
    }

    #[test]
    fn projects_map_layers_with_natural_earth() {
        let spec = build(&fixtures::sample()).unwrap();
        let map = &spec.views()[0];
        assert_eq!(map.layer.len(), 3);
        assert_eq!(
            map.projection.map(|p| p.kind),
            Some(ProjectionType::NaturalEarth1)
        );
    }

    #[test]
    fn requires_coordinates() {
        let table = fixtures::sample_without("Longitude");
        assert!(matches!(
            build(&table),
            Err(ChartError::SchemaMismatch {
                chart: ChartKind::MapHistogram,
                field: TripField::Longitude,
            })
        ));
    }
}
