//! Scatter filtered by clicking a per-country bar chart that doubles as
//! its legend.
//!
//! The legend bars declare the country selection and are never filtered
//! themselves, so every country stays clickable. The selected country keeps
//! its category colour and the rest turn grey.

use bike_viz_chart_models::{
    Axis, AxisOrient, Channel, ChartSpec, Composition, ConditionTarget, Data, Encoding, FieldDef,
    Mark, MarkType, Param, ParamPredicate, View,
};
use bike_viz_trip_models::{TripField, TripTable};

use crate::{ChartError, ChartKind, TRIPS_DATASET, require_fields, trip_rows};

/// Point selection keyed by country.
pub const SELECTION: &str = "country_select";

/// Colour of unselected legend bars.
pub const UNSELECTED_COLOR: &str = "lightgray";

pub const REQUIRED_FIELDS: &[TripField] = &[
    TripField::City,
    TripField::Month,
    TripField::Country,
    TripField::NumTrips,
    TripField::AvgDurationMinutes,
];

/// Builds the scatter and its clickable country legend, side by side.
///
/// # Errors
///
/// Returns [`ChartError::SchemaMismatch`] if `table` lacks a column in
/// [`REQUIRED_FIELDS`].
pub fn build(table: &TripTable) -> Result<ChartSpec, ChartError> {
    require_fields(ChartKind::InteractiveLegend, table)?;

    let country = TripField::Country.name();
    let trips = TripField::NumTrips.name();
    let duration = TripField::AvgDurationMinutes.name();

    let scatter = View::unit(Mark::new(MarkType::Circle).with_size(80))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(Encoding {
            x: Some(
                FieldDef::quantitative(duration)
                    .with_title("Average Trip Duration (min)")
                    .into(),
            ),
            y: Some(
                FieldDef::quantitative(trips)
                    .with_title("Number of Trips")
                    .into(),
            ),
            color: Some(FieldDef::nominal(country).without_legend().into()),
            tooltip: vec![
                FieldDef::nominal(country),
                FieldDef::nominal(TripField::City.name()),
                FieldDef::nominal(TripField::Month.name()),
                FieldDef::quantitative(trips),
                FieldDef::quantitative(duration),
            ],
            ..Encoding::default()
        })
        .with_filter(ParamPredicate::all_when_empty(SELECTION))
        .with_title("Trips vs. Duration (Filtered by Country)")
        .with_size(500, 300);

    let legend = View::unit(Mark::new(MarkType::Bar))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(Encoding {
            x: Some(FieldDef::sum(trips).with_title("Total Trips").into()),
            y: Some(
                FieldDef::nominal(country)
                    .with_axis(Axis {
                        orient: Some(AxisOrient::Right),
                        title: Some("Country".to_string()),
                    })
                    .into(),
            ),
            color: Some(Channel::when(
                ParamPredicate::all_when_empty(SELECTION),
                ConditionTarget::Field(FieldDef::nominal(country).without_legend()),
                UNSELECTED_COLOR,
            )),
            tooltip: vec![FieldDef::nominal(country), FieldDef::sum(trips)],
            ..Encoding::default()
        })
        .with_param(Param::point(SELECTION, &[country]))
        .with_title("All Countries (Click to Filter)")
        .with_size(200, 300);

    Ok(ChartSpec::new(Composition::Hconcat(vec![scatter, legend]))
        .with_dataset(TRIPS_DATASET, trip_rows(table)?))
}
