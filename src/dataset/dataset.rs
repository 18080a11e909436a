use serde::{Serialize, Deserialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use super::csv::{parse_floats, parse_row};
use super::record::Record;
use super::species::Species;

/// Labelled records in file order. A record's index is its data-row position
/// (header excluded). Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Where the records came from; informational only.
    pub source: String,
    records: Vec<Record>,
}

impl Dataset {
    /// Loads a comma-delimited file of `d1,..,dn,species_name` rows.
    /// See [`Dataset::from_csv_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let dataset = Dataset::from_csv_str(path.display().to_string(), &text)?;
        debug!(source = %dataset.source, records = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    /// Parses dataset text.
    ///
    /// The first line is always treated as a header and dropped, so an empty
    /// input gives an empty dataset. Blank lines are skipped. Every other
    /// column than the last must be numeric, and every row must be as wide
    /// as the first one. Unknown species names are encoded as all-zero
    /// vectors and logged.
    pub fn from_csv_str(source: impl Into<String>, text: &str) -> Result<Dataset> {
        let mut records = Vec::new();
        let mut width: Option<usize> = None;

        for (i, line) in text.lines().skip(1).filter(|l| !l.trim().is_empty()).enumerate() {
            let row = i + 1;
            let cells = parse_row(line);
            if cells.len() < 2 {
                return Err(Error::Csv {
                    row,
                    message: format!("expected measurements and a species name, got {} column(s)", cells.len()),
                });
            }
            match width {
                Some(w) if w != cells.len() => {
                    return Err(Error::Csv {
                        row,
                        message: format!("{} columns, first row has {}", cells.len(), w),
                    });
                }
                _ => width = Some(cells.len()),
            }

            let (dims, label) = cells.split_at(cells.len() - 1);
            let species_name = &label[0];
            if Species::from_label(species_name).is_none() {
                warn!(row, species = %species_name, "unrecognised species label, encoding as zero vector");
            }
            records.push(Record::new(parse_floats(dims, row)?, species_name));
        }

        Ok(Dataset { source: source.into(), records })
    }

    pub fn from_records(source: impl Into<String>, records: Vec<Record>) -> Dataset {
        Dataset { source: source.into(), records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Measurement count per record (0 for an empty dataset).
    pub fn input_size(&self) -> usize {
        self.records.first().map_or(0, |r| r.flower_dimensions().len())
    }

    /// Width of the species vector.
    pub fn output_size(&self) -> usize {
        self.records.first().map_or(Species::ALL.len(), |r| r.species_vector().len())
    }

    /// `(input, expected_output)` pairs in index order. Can be called any
    /// number of times and always yields the same sequence.
    pub fn records_for_evaluation(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        self.records.iter().map(|r| (r.flower_dimensions(), r.species_vector()))
    }
}
