//! Comma-delimited line codec for scan, snapshot and allowlist files.
//!
//! Lines carry `ssid,bssid,rssi,channel,encryption[,status]` with no header,
//! quoting or escaping.

mod record;

pub use record::{
    format_line, parse_allowlist_line, parse_line, parse_records, ParseError, ParsedRecords,
    RecordParser, FIELD_COUNT, MIN_SCAN_FIELDS,
};
