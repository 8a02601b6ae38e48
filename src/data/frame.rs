//! In-memory CSV table.
//!
//! A `Frame` keeps the header and every record as text so that slices of the
//! raw dataset can be written back without reformatting any value. Typed
//! access parses on demand and reports the offending cell on failure.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Writer};
use rodar_common::{Result, RodarError};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::config::FeatureSchema;
use crate::io::ensure_parent_dir;

/// Header plus string records, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    headers: StringRecord,
    records: Vec<StringRecord>,
    source: PathBuf,
}

impl Frame {
    /// Build a frame from owned rows; every row must match the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let headers = StringRecord::from(headers);
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() != headers.len() {
                return Err(RodarError::ShapeMismatch { expected: headers.len(), actual: row.len() });
            }
            records.push(StringRecord::from(row));
        }
        Ok(Self { headers, records, source: PathBuf::from("<memory>") })
    }

    /// Load a CSV file with a header row.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RodarError::DatasetNotFound { path: path.to_path_buf() });
        }

        let csv_error =
            |e: csv::Error| RodarError::serialization(format!("reading {}: {e}", path.display()));

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path).map_err(csv_error)?;
        let headers = reader.headers().map_err(csv_error)?.clone();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>().map_err(csv_error)?;

        tracing::debug!(path = %path.display(), rows = records.len(), "loaded dataset");
        Ok(Self { headers, records, source: path.to_path_buf() })
    }

    /// Write header and records to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let csv_error =
            |e: csv::Error| RodarError::serialization(format!("writing {}: {e}", path.display()));

        let mut writer = Writer::from_path(path).map_err(csv_error)?;
        writer.write_record(&self.headers).map_err(csv_error)?;
        for record in &self.records {
            writer.write_record(record).map_err(csv_error)?;
        }
        writer
            .flush()
            .map_err(|e| RodarError::io(format!("flushing {}", path.display()), e))?;

        tracing::debug!(path = %path.display(), rows = self.records.len(), "saved dataset");
        Ok(())
    }

    /// File the frame was loaded from, used in error messages.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Position of `name` in the header.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| RodarError::MissingColumn {
            column: name.to_string(),
            path: self.source.clone(),
        })
    }

    /// Fail on the first of `names` the header lacks.
    pub fn require_columns<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.column_index(name)?;
        }
        Ok(())
    }

    /// Raw cell text of one column.
    pub fn text_column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.records.iter().map(|r| r.get(idx).unwrap_or("")).collect())
    }

    /// Parse a column as `f64`. Rows are numbered from 1 in errors.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(name)?;
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| parse_f64(record.get(idx).unwrap_or(""), name, row + 1))
            .collect()
    }

    /// Parse a column of ISO dates. A timestamp (`YYYY-MM-DD HH:MM:SS`, or
    /// with a `T` separator) keeps only its date.
    pub fn date_column(&self, name: &str) -> Result<Vec<NaiveDate>> {
        let idx = self.column_index(name)?;
        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let cell = record.get(idx).unwrap_or("");
                parse_date(cell.trim()).ok_or_else(|| RodarError::InvalidValue {
                    column: name.to_string(),
                    row: row + 1,
                    value: cell.to_string(),
                    expected: "an ISO date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)",
                })
            })
            .collect()
    }

    /// Row-major model inputs in `schema.model_features()` order.
    pub fn feature_matrix(&self, schema: &FeatureSchema) -> Result<Vec<Vec<f64>>> {
        let features = schema.model_features();
        let indices = features
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>>>()?;

        self.records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                indices
                    .iter()
                    .zip(features.iter())
                    .map(|(&idx, name)| parse_f64(record.get(idx).unwrap_or(""), name, row + 1))
                    .collect()
            })
            .collect()
    }

    /// Keep the rows for which `keep(row_index, record)` holds, in order.
    pub fn filter_rows(&self, mut keep: impl FnMut(usize, &StringRecord) -> bool) -> Frame {
        let records = self
            .records
            .iter()
            .enumerate()
            .filter(|(i, r)| keep(*i, r))
            .map(|(_, r)| r.clone())
            .collect();
        Frame { headers: self.headers.clone(), records, source: self.source.clone() }
    }

    /// Rows at `indices`, in the order given. Out-of-range indices are skipped.
    pub fn select_rows(&self, indices: &[usize]) -> Frame {
        let records = indices.iter().filter_map(|&i| self.records.get(i).cloned()).collect();
        Frame { headers: self.headers.clone(), records, source: self.source.clone() }
    }

    /// Copy of the frame with `name` set to `values`, appended if absent.
    pub fn with_column(&self, name: &str, values: &[f64]) -> Result<Frame> {
        if values.len() != self.records.len() {
            return Err(RodarError::ShapeMismatch {
                expected: self.records.len(),
                actual: values.len(),
            });
        }

        let existing = self.headers.iter().position(|h| h == name);
        let headers = match existing {
            Some(_) => self.headers.clone(),
            None => {
                let mut h = self.headers.clone();
                h.push_field(name);
                h
            }
        };

        let records = self
            .records
            .iter()
            .zip(values.iter())
            .map(|(record, value)| {
                let cell = value.to_string();
                match existing {
                    Some(idx) => record
                        .iter()
                        .enumerate()
                        .map(|(i, f)| if i == idx { cell.as_str() } else { f })
                        .collect(),
                    None => {
                        let mut r = record.clone();
                        r.push_field(&cell);
                        r
                    }
                }
            })
            .collect();

        Ok(Frame { headers, records, source: self.source.clone() })
    }

    /// SHA-256 over header and records, hex encoded.
    ///
    /// Fields are separated by 0x1F and records by newline, so the digest
    /// only depends on cell text and order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for record in std::iter::once(&self.headers).chain(self.records.iter()) {
            for (i, field) in record.iter().enumerate() {
                if i > 0 {
                    hasher.update([0x1f]);
                }
                hasher.update(field.as_bytes());
            }
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }
}

fn parse_f64(cell: &str, column: &str, row: usize) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RodarError::InvalidValue {
            column: column.to_string(),
            row,
            value: cell.to_string(),
            expected: "a finite number",
        })
}

/// `YYYY-MM-DD`, or a timestamp on that date.
fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell, "%Y-%m-%d").ok().or_else(|| {
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
            .map(|stamp| stamp.date())
    })
}
