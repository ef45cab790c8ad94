use crate::domain::{NetworkRecord, NetworkStatus};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of fields in a fully populated line.
pub const FIELD_COUNT: usize = 6;

/// Scan and snapshot lines may omit the trailing status field.
pub const MIN_SCAN_FIELDS: usize = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("Invalid {field} value '{value}'")]
    InvalidInteger { field: &'static str, value: String },
    #[error("Empty line")]
    EmptyLine,
}

/// Records recovered from a file plus the number of lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    pub records: Vec<NetworkRecord>,
    pub skipped: usize,
}

/// Line parser parameterised by how many fields a line must carry.
///
/// Scan and snapshot files accept five fields (status optional); allowlist
/// files only accept complete six-field lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordParser {
    kind: &'static str,
    min_fields: usize,
}

impl RecordParser {
    pub const fn scan() -> Self {
        Self {
            kind: "scan",
            min_fields: MIN_SCAN_FIELDS,
        }
    }

    pub const fn allowlist() -> Self {
        Self {
            kind: "allowlist",
            min_fields: FIELD_COUNT,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn min_fields(&self) -> usize {
        self.min_fields
    }

    pub fn parse_line(&self, line: &str) -> Result<NetworkRecord, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < self.min_fields {
            return Err(ParseError::TooFewFields {
                expected: self.min_fields,
                found: parts.len(),
            });
        }

        let rssi = parse_int("rssi", parts[2])?;
        let channel = parse_int("channel", parts[3])?;

        Ok(NetworkRecord {
            ssid: parts[0].to_string(),
            bssid: parts[1].to_string(),
            rssi,
            channel,
            encryption: parts[4].to_string(),
            status: parts.get(5).and_then(|field| NetworkStatus::from_field(field)),
        })
    }

    /// Parse every non-blank line, skipping the malformed ones.
    ///
    /// `\n`, `\r\n` and a bare `\r` all end a line.
    pub fn parse_records(&self, text: &str) -> ParsedRecords {
        let mut parsed = ParsedRecords::default();

        for (index, line) in text.lines().flat_map(|line| line.split('\r')).enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_line(line) {
                Ok(record) => parsed.records.push(record),
                Err(e) => {
                    warn!(
                        kind = self.kind,
                        line_number = index + 1,
                        "Skipping malformed line: {}",
                        e
                    );
                    parsed.skipped += 1;
                }
            }
        }

        debug!(
            kind = self.kind,
            records = parsed.records.len(),
            skipped = parsed.skipped,
            "Parsed records"
        );
        parsed
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::scan()
    }
}

// Integer fields tolerate surrounding whitespace; text fields are kept verbatim.
fn parse_int(field: &'static str, value: &str) -> Result<i32, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

/// Parse one scan or snapshot line.
pub fn parse_line(line: &str) -> Result<NetworkRecord, ParseError> {
    RecordParser::scan().parse_line(line)
}

/// Parse one allowlist line; all six fields are required.
pub fn parse_allowlist_line(line: &str) -> Result<NetworkRecord, ParseError> {
    RecordParser::allowlist().parse_line(line)
}

/// Parse the contents of a scan or snapshot file.
pub fn parse_records(text: &str) -> ParsedRecords {
    RecordParser::scan().parse_records(text)
}

/// Render a record as a six-field line (without the trailing newline).
pub fn format_line(record: &NetworkRecord) -> String {
    format!(
        "{},{},{},{},{},{}",
        record.ssid,
        record.bssid,
        record.rssi,
        record.channel,
        record.encryption,
        record.effective_status()
    )
}
