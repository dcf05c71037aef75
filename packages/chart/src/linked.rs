//! Brushed scatter linked to a trips-per-city bar chart.
//!
//! Shared by the temperature and duration charts, which differ only in the
//! brushed measure.

use bike_viz_chart_models::{
    Aggregate, ChartSpec, Composition, Data, Encoding, FieldDef, Mark, MarkType, Param,
    ParamPredicate, SelectChannel, SortOrder, View,
};
use bike_viz_trip_models::{TripField, TripTable};

use crate::{TRIPS_DATASET, trip_rows};

/// The measure the scatter plots on `x` and the user brushes.
pub struct BrushedMeasure {
    /// Selection param name.
    pub brush: &'static str,
    pub field: TripField,
    pub axis_title: &'static str,
    /// Fixed `x` domain, when the axis should not follow the data.
    pub domain: Option<(f64, f64)>,
    pub scatter_title: &'static str,
    pub bar_title: &'static str,
}

/// Scatter of `measure` against trip count on top, city totals of the
/// brushed rows below.
pub fn scatter_with_city_totals(
    table: &TripTable,
    measure: &BrushedMeasure,
) -> Result<ChartSpec, serde_json::Error> {
    let mut x = FieldDef::quantitative(measure.field.name()).with_title(measure.axis_title);
    if let Some((min, max)) = measure.domain {
        x = x.with_domain(min, max);
    }

    let scatter = View::unit(Mark::new(MarkType::Point))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(Encoding {
            x: Some(x.into()),
            y: Some(
                FieldDef::quantitative(TripField::NumTrips.name())
                    .with_title("Number of Trips")
                    .into(),
            ),
            color: Some(
                FieldDef::nominal(TripField::Country.name())
                    .with_legend_title("Country")
                    .into(),
            ),
            tooltip: vec![
                FieldDef::nominal(TripField::City.name()),
                FieldDef::nominal(TripField::Month.name()),
                FieldDef::quantitative(TripField::NumTrips.name()),
                FieldDef::quantitative(measure.field.name()),
            ],
            ..Encoding::default()
        })
        .with_param(Param::interval(measure.brush, &[SelectChannel::X]))
        .with_title(measure.scatter_title)
        .with_size(500, 300);

    let bars = View::unit(Mark::new(MarkType::Bar))
        .with_data(Data::named(TRIPS_DATASET))
        .with_encoding(city_totals_encoding())
        .with_filter(ParamPredicate::all_when_empty(measure.brush))
        .with_title(measure.bar_title)
        .with_size(500, 300);

    Ok(ChartSpec::new(Composition::Vconcat(vec![scatter, bars]))
        .with_dataset(TRIPS_DATASET, trip_rows(table)?))
}

/// `sum(Num_Trips)` per city, largest first.
fn city_totals_encoding() -> Encoding {
    let trips = TripField::NumTrips.name();
    Encoding {
        x: Some(
            FieldDef::sum(trips)
                .with_title("Total Trips in Selection")
                .into(),
        ),
        y: Some(
            FieldDef::nominal(TripField::City.name())
                .with_title("City")
                .sorted_by(Aggregate::Sum, trips, SortOrder::Descending)
                .into(),
        ),
        color: Some(FieldDef::nominal(TripField::Country.name()).into()),
        tooltip: vec![
            FieldDef::nominal(TripField::Country.name()),
            FieldDef::nominal(TripField::City.name()),
            FieldDef::sum(trips),
        ],
        ..Encoding::default()
    }
}
