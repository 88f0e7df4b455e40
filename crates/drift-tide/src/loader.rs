//! CSV tide-series loader.
//!
//! The station-file formats of the upstream tide tooling are reduced here
//! to one CSV table, one row per tabulated sample:
//!
//! ```csv
//! time_unix_secs,height,velocity_factor
//! 0,0.30,0.95
//! 3600,0.55,1.10
//! 7200,0.40,1.00
//! ```
//!
//! Rows must already be in increasing time order; the series constructor
//! rejects anything else.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use drift_core::ModelTime;

use crate::series::{TidalTimeSeries, TideSample};
use crate::TideError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SampleRecord {
    time_unix_secs:  i64,
    height:          f64,
    velocity_factor: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a station's [`TidalTimeSeries`] from a CSV file.  The file stem is
/// used as the station label.
pub fn load_series_csv(path: &Path) -> Result<TidalTimeSeries, TideError> {
    let station = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = std::fs::File::open(path).map_err(TideError::Io)?;
    load_series_reader(station, file)
}

/// Like [`load_series_csv`] but accepts any `Read` source and an explicit
/// station label.
pub fn load_series_reader<R: Read>(
    station: impl Into<String>,
    reader: R,
) -> Result<TidalTimeSeries, TideError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();

    for result in csv_reader.deserialize::<SampleRecord>() {
        let row = result.map_err(|e| TideError::Parse(e.to_string()))?;
        samples.push(TideSample {
            time:            ModelTime(row.time_unix_secs),
            height:          row.height,
            velocity_factor: row.velocity_factor,
        });
    }

    TidalTimeSeries::new(station, samples)
}
