#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads the bike-share trip CSV into an immutable [`TripTable`].
//!
//! The dataset is read exactly once at startup. Any failure here is fatal
//! for the server: a missing file, a malformed row, or a header without
//! the identity columns (see [`TripField::IDENTITY`]).

pub mod paths;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bike_viz_trip_models::{TripField, TripRecord, TripTable};
use thiserror::Error;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row could not be parsed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks a column every dataset must carry.
    #[error("Dataset is missing required column '{column}'")]
    MissingColumn {
        /// The absent column.
        column: TripField,
    },
}

/// Loads the trip dataset from the CSV file at `path`.
///
/// # Errors
///
/// * [`DatasetError::Io`] if the file cannot be opened
/// * [`DatasetError::Csv`] if the header or any row is malformed
/// * [`DatasetError::MissingColumn`] if an identity column is absent
pub fn load(path: &Path) -> Result<TripTable, DatasetError> {
    log::info!("Loading trip dataset from {}", path.display());
    let file = File::open(path)?;
    let table = load_from_reader(file)?;
    log::info!(
        "Loaded {} trip records ({} columns)",
        table.len(),
        table.fields().len()
    );
    Ok(table)
}

/// Parses a trip dataset from any CSV source.
///
/// Unknown columns (such as a leftover index column) are ignored.
///
/// # Errors
///
/// Same as [`load`], minus the file-open failure.
pub fn load_from_reader<R: Read>(reader: R) -> Result<TripTable, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let fields: BTreeSet<TripField> = reader
        .headers()?
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();

    if let Some(column) = TripField::IDENTITY
        .iter()
        .copied()
        .find(|f| !fields.contains(f))
    {
        return Err(DatasetError::MissingColumn { column });
    }

    let records = reader
        .deserialize::<TripRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Parsed {} rows", records.len());

    Ok(TripTable::new(fields, records))
}
