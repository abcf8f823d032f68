// Encoded Reader: parses the CSV under an ordered list of candidate text
// encodings, returning the first one that decodes and parses cleanly.
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A successfully parsed CSV: header row, data rows, and the encoding label
/// that won. Field values are already whitespace-trimmed.
#[derive(Debug, Clone)]
pub struct RawCsv {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
    pub encoding: String,
}

pub struct EncodedCsvReader {
    encodings: Vec<String>,
}

impl EncodedCsvReader {
    pub fn new(encodings: Vec<String>) -> Self {
        Self { encodings }
    }

    /// Reads the file once and tries each candidate encoding in order.
    ///
    /// A candidate fails if the bytes decode with malformed sequences or the
    /// decoded text does not parse as CSV. A candidate that decodes without
    /// error but to wrong characters (overlapping byte ranges between
    /// single-byte encodings) is accepted; there is no content validation
    /// beyond "did the decode/parse raise". Only when every candidate fails
    /// does the caller see a `ReadError` listing each attempt.
    pub fn read(&self, path: &Path) -> Result<RawCsv, EngineError> {
        let bytes = fs::read(path)?;

        let mut attempts: Vec<String> = Vec::new();
        for label in &self.encodings {
            let encoding = resolve_encoding(label)?;
            let (text, _, had_errors) = encoding.decode(&bytes);
            if had_errors {
                attempts.push(format!("{}: malformed byte sequence", label));
                continue;
            }
            match parse_csv(&text) {
                Ok((headers, records)) => {
                    debug!(encoding = %label, rows = records.len(), "Decoded sales CSV");
                    return Ok(RawCsv {
                        headers,
                        records,
                        encoding: label.clone(),
                    });
                }
                Err(e) => attempts.push(format!("{}: {}", label, e)),
            }
        }

        Err(EngineError::ReadError {
            path: path.to_path_buf(),
            attempts,
        })
    }
}

impl Default for EncodedCsvReader {
    fn default() -> Self {
        Self::new(
            ["utf-8", "tis-620", "cp874", "latin-1"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

/// Maps a configured label to an encoding. The WHATWG registry behind
/// `Encoding::for_label` does not know "cp874"/"ms874" or "latin-1", so
/// those aliases are resolved explicitly.
fn resolve_encoding(label: &str) -> Result<&'static Encoding, EngineError> {
    let normalized = label.trim().to_lowercase();
    match normalized.as_str() {
        "cp874" | "ms874" | "windows-874" => Ok(encoding_rs::WINDOWS_874),
        "latin-1" | "latin1" | "iso-8859-1" => Ok(encoding_rs::WINDOWS_1252),
        other => Encoding::for_label(other.as_bytes()).ok_or_else(|| {
            EngineError::ConfigError(format!("Unknown encoding label '{}'", label))
        }),
    }
}

fn parse_csv(text: &str) -> Result<(StringRecord, Vec<StringRecord>), csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }
    Ok((headers, records))
}
