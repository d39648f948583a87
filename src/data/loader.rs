//! Data loading and saving utilities
//!
//! Reads the Stroop CSV (`Subject`, `Congruent`, `Incongruent`) and writes
//! it back out with the derived `Difference` column.

use super::types::{StroopDataset, StroopRecord};
use crate::error::{Result, StroopError};
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 2] = ["Congruent", "Incongruent"];

/// Row layout of exported files
#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Subject")]
    subject: Option<&'a str>,
    #[serde(rename = "Congruent")]
    congruent: f64,
    #[serde(rename = "Incongruent")]
    incongruent: f64,
    #[serde(rename = "Difference")]
    difference: f64,
}

/// Data loader for CSV files
pub struct DataLoader;

impl DataLoader {
    /// Load the dataset from a CSV file
    ///
    /// A missing file, a malformed row or a non-numeric value is reported
    /// as [`StroopError::Parse`].
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<StroopDataset> {
        let path = path.as_ref();
        let location = path.display().to_string();
        let file = File::open(path)
            .map_err(|e| StroopError::parse(&location, format!("failed to open file: {}", e)))?;

        let dataset = Self::from_reader(file, &location)?;
        debug!("Loaded {} records from {}", dataset.len(), location);
        Ok(dataset)
    }

    /// Load the dataset from any reader; `location` names the source in errors
    pub fn from_reader<R: Read>(reader: R, location: &str) -> Result<StroopDataset> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| csv_parse_error(location, e))?
            .clone();
        check_headers(&headers, location)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| csv_parse_error(location, e))?;
            let line = row.position().map(|p| p.line());

            let record: StroopRecord =
                row.deserialize(Some(&headers))
                    .map_err(|e| StroopError::Parse {
                        location: location.to_string(),
                        line,
                        message: e.to_string(),
                    })?;

            if !record.congruent.is_finite() || !record.incongruent.is_finite() {
                return Err(StroopError::Parse {
                    location: location.to_string(),
                    line,
                    message: "reaction times must be finite numbers".to_string(),
                });
            }

            records.push(record);
        }

        if records.is_empty() {
            return Err(StroopError::InsufficientData(format!(
                "{} contains no data rows",
                location
            )));
        }

        Ok(StroopDataset::new(records))
    }

    /// Save the dataset, including the derived difference column
    pub fn save_csv<P: AsRef<Path>>(dataset: &StroopDataset, path: P) -> Result<()> {
        let file = File::create(&path)?;
        let mut writer = Writer::from_writer(file);

        for record in dataset.records() {
            writer.serialize(ExportRow {
                subject: record.subject.as_deref(),
                congruent: record.congruent,
                incongruent: record.incongruent,
                difference: record.difference(),
            })?;
        }

        writer.flush()?;
        debug!("Saved {} records to {:?}", dataset.len(), path.as_ref());
        Ok(())
    }
}

fn check_headers(headers: &StringRecord, location: &str) -> Result<()> {
    for name in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == name) {
            return Err(StroopError::Parse {
                location: location.to_string(),
                line: Some(1),
                message: format!("missing required column '{}'", name),
            });
        }
    }
    Ok(())
}

fn csv_parse_error(location: &str, err: csv::Error) -> StroopError {
    StroopError::Parse {
        location: location.to_string(),
        line: err.position().map(|p| p.line()),
        message: err.to_string(),
    }
}
