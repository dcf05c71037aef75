#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bike-share trip record and table types.
//!
//! A [`TripTable`] is loaded once at startup and shared read-only by every
//! request. Column names match the headers of the processed CSV file, which
//! are also the field names used in the generated chart specifications.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A column of the trip dataset.
///
/// The string form is the CSV header (and chart field) name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TripField {
    /// City the trips were taken in.
    #[strum(serialize = "City")]
    #[serde(rename = "City")]
    City,
    /// Month label.
    #[strum(serialize = "Month")]
    #[serde(rename = "Month")]
    Month,
    /// Country the city belongs to.
    #[strum(serialize = "Country")]
    #[serde(rename = "Country")]
    Country,
    /// Number of trips.
    #[strum(serialize = "Num_Trips")]
    #[serde(rename = "Num_Trips")]
    NumTrips,
    /// Average temperature in degrees Celsius.
    #[strum(serialize = "Avg_Temperature_C")]
    #[serde(rename = "Avg_Temperature_C")]
    AvgTemperatureC,
    /// Average trip duration in minutes.
    #[strum(serialize = "Avg_Duration_Minutes")]
    #[serde(rename = "Avg_Duration_Minutes")]
    AvgDurationMinutes,
    /// City latitude.
    #[strum(serialize = "Latitude")]
    #[serde(rename = "Latitude")]
    Latitude,
    /// City longitude.
    #[strum(serialize = "Longitude")]
    #[serde(rename = "Longitude")]
    Longitude,
}

impl TripField {
    /// Every known column, in file order.
    pub const ALL: &[Self] = &[
        Self::City,
        Self::Month,
        Self::Country,
        Self::NumTrips,
        Self::AvgTemperatureC,
        Self::AvgDurationMinutes,
        Self::Latitude,
        Self::Longitude,
    ];

    /// Columns every dataset file must carry.
    ///
    /// Measure and coordinate columns are optional at load time and are
    /// checked by the charts that need them.
    pub const IDENTITY: &[Self] = &[Self::City, Self::Month, Self::Country, Self::NumTrips];

    /// Returns the column name as used in CSV headers and chart encodings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Month => "Month",
            Self::Country => "Country",
            Self::NumTrips => "Num_Trips",
            Self::AvgTemperatureC => "Avg_Temperature_C",
            Self::AvgDurationMinutes => "Avg_Duration_Minutes",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
        }
    }
}

/// One row of the trip dataset.
///
/// Measure columns are `None` when the file lacks the column or the cell is
/// blank (coordinates are only populated for mapped cities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// City name.
    #[serde(rename = "City")]
    pub city: String,
    /// Month label.
    #[serde(rename = "Month")]
    pub month: String,
    /// Country name.
    #[serde(rename = "Country")]
    pub country: String,
    /// Number of trips.
    #[serde(rename = "Num_Trips")]
    pub num_trips: u64,
    /// Average temperature (°C).
    #[serde(
        rename = "Avg_Temperature_C",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avg_temperature_c: Option<f64>,
    /// Average trip duration (minutes).
    #[serde(
        rename = "Avg_Duration_Minutes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub avg_duration_minutes: Option<f64>,
    /// Latitude.
    #[serde(rename = "Latitude", default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude.
    #[serde(rename = "Longitude", default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// The full, immutable trip dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    fields: BTreeSet<TripField>,
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Creates a table from the columns present in the source and its rows.
    #[must_use]
    pub const fn new(fields: BTreeSet<TripField>, records: Vec<TripRecord>) -> Self {
        Self { fields, records }
    }

    /// Columns present in the source file.
    #[must_use]
    pub const fn fields(&self) -> &BTreeSet<TripField> {
        &self.fields
    }

    /// All rows, in file order.
    #[must_use]
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Whether the source file carried `field`.
    #[must_use]
    pub fn has_field(&self, field: TripField) -> bool {
        self.fields.contains(&field)
    }

    /// Returns the first of `required` that this table does not carry.
    #[must_use]
    pub fn first_missing(&self, required: &[TripField]) -> Option<TripField> {
        required.iter().copied().find(|f| !self.has_field(*f))
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_strum() {
        for field in TripField::ALL {
            let parsed: TripField = field.name().parse().unwrap();
            assert_eq!(parsed, *field);
            assert_eq!(field.to_string(), field.name());
        }
    }

    #[test]
    fn rejects_unknown_header() {
        assert!("Num Trips".parse::<TripField>().is_err());
    }

    #[test]
    fn reports_first_missing_field() {
        let table = TripTable::new(
            TripField::IDENTITY.iter().copied().collect(),
            Vec::new(),
        );
        assert_eq!(table.first_missing(TripField::IDENTITY), None);
        assert_eq!(
            table.first_missing(&[TripField::City, TripField::Longitude, TripField::Latitude]),
            Some(TripField::Longitude)
        );
    }

    #[test]
    fn skips_absent_measures_when_serialized() {
        let record = TripRecord {
            city: "Oslo".to_string(),
            month: "Jan".to_string(),
            country: "Norway".to_string(),
            num_trips: 12,
            avg_temperature_c: Some(-3.5),
            avg_duration_minutes: None,
            latitude: None,
            longitude: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["City"], "Oslo");
        assert_eq!(value["Num_Trips"], 12);
        assert_eq!(value["Avg_Temperature_C"], -3.5);
        assert!(value.get("Latitude").is_none());
    }
}
