//! Data types for the Stroop experiment

use serde::{Deserialize, Serialize};
use std::fmt;

/// One subject's reaction times (seconds) under both conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StroopRecord {
    /// Optional subject identifier
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    /// Time to name ink colors when word and color agree
    #[serde(rename = "Congruent")]
    pub congruent: f64,
    /// Time to name ink colors when word and color conflict
    #[serde(rename = "Incongruent")]
    pub incongruent: f64,
}

impl StroopRecord {
    pub fn new(congruent: f64, incongruent: f64) -> Self {
        Self {
            subject: None,
            congruent,
            incongruent,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Incongruent minus congruent time
    pub fn difference(&self) -> f64 {
        self.incongruent - self.congruent
    }
}

/// Columns of the dataset, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Congruent,
    Incongruent,
    Difference,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Congruent, Column::Incongruent, Column::Difference];

    /// Header name as it appears in CSV files
    pub fn name(&self) -> &'static str {
        match self {
            Column::Congruent => "Congruent",
            Column::Incongruent => "Incongruent",
            Column::Difference => "Difference",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// In-memory Stroop dataset
///
/// The difference column is always derived from the two measured columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StroopDataset {
    records: Vec<StroopRecord>,
}

impl StroopDataset {
    pub fn new(records: Vec<StroopRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StroopRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of a column, one per record
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| match column {
                Column::Congruent => r.congruent,
                Column::Incongruent => r.incongruent,
                Column::Difference => r.difference(),
            })
            .collect()
    }

    pub fn congruent(&self) -> Vec<f64> {
        self.column(Column::Congruent)
    }

    pub fn incongruent(&self) -> Vec<f64> {
        self.column(Column::Incongruent)
    }

    pub fn difference(&self) -> Vec<f64> {
        self.column(Column::Difference)
    }
}

impl FromIterator<StroopRecord> for StroopDataset {
    fn from_iter<I: IntoIterator<Item = StroopRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
