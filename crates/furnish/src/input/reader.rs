//! Observation batch reader for JSON and delimited files.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::source::{is_null_value, BatchSource};
use crate::error::{FurnishError, Result};
use crate::reconcile::Observation;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Batch file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array of records.
    Json,
    /// Delimited text with a header row.
    Delimited(u8),
}

impl InputFormat {
    /// Short name recorded in [`BatchSource::format`].
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Delimited(b'\t') => "tsv",
            InputFormat::Delimited(b',') => "csv",
            InputFormat::Delimited(b';') => "csv-semicolon",
            InputFormat::Delimited(b'|') => "psv",
            InputFormat::Delimited(_) => "delimited",
        }
    }
}

/// Reads vendor observation batches, detecting the format per file.
#[derive(Debug, Clone, Default)]
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a file and return its observations and metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(Vec<Observation>, BatchSource)> {
        let path = path.as_ref();
        let io_err = |e| FurnishError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let format = detect_format(path, &contents)?;
        let observations = self.read_bytes(&contents, format)?;

        debug!(
            path = %path.display(),
            format = format.name(),
            records = observations.len(),
            "Read observation batch"
        );

        let source = BatchSource::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format.name().to_string(),
            observations.len(),
        );
        Ok((observations, source))
    }

    /// Parse bytes in a known format.
    pub fn read_bytes(&self, bytes: &[u8], format: InputFormat) -> Result<Vec<Observation>> {
        let observations = match format {
            InputFormat::Json => read_json(bytes)?,
            InputFormat::Delimited(delimiter) => read_delimited(bytes, delimiter)?,
        };

        if observations.is_empty() {
            return Err(FurnishError::EmptyData("No records found".to_string()));
        }
        Ok(observations)
    }
}

/// Deserialize one row. A row that cannot be read becomes an empty
/// observation so it is reported as missing its key at the same position.
fn observation_from_row(index: usize, row: Value) -> Observation {
    serde_json::from_value(row).unwrap_or_else(|e| {
        warn!(record = index, error = %e, "Unreadable record, keeping its position only");
        Observation::default()
    })
}

fn read_json(bytes: &[u8]) -> Result<Vec<Observation>> {
    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Array(rows) => Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| observation_from_row(index, row))
            .collect()),
        _ => Err(FurnishError::UnsupportedFormat(
            "expected a JSON array of records".to_string(),
        )),
    }
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Observation>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    if headers.is_empty() {
        return Err(FurnishError::EmptyData("No columns found".to_string()));
    }

    let mut observations = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(record = index, error = %e, "Unreadable row, keeping its position only");
                observations.push(Observation::default());
                continue;
            }
        };
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if !is_null_value(cell) {
                row.insert(header.clone(), Value::String(cell.to_string()));
            }
        }
        observations.push(observation_from_row(index, Value::Object(row)));
    }

    Ok(observations)
}

/// Pick JSON by extension or leading bracket, else detect a delimiter.
fn detect_format(path: &Path, bytes: &[u8]) -> Result<InputFormat> {
    let is_json_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());

    if is_json_ext || first == Some(&b'[') {
        return Ok(InputFormat::Json);
    }
    Ok(InputFormat::Delimited(detect_delimiter(bytes)?))
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(FurnishError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines win; tab breaks ties since it rarely
        // appears inside product names.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
