use super::StoreError;
use crate::domain::NetworkRecord;
use crate::parser::{ParsedRecords, RecordParser, format_line};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locations of the scan, snapshot and allowlist files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub scan: PathBuf,
    pub snapshot: PathBuf,
    pub allowlist: PathBuf,
}

impl DataFiles {
    pub fn new(
        scan: impl Into<PathBuf>,
        snapshot: impl Into<PathBuf>,
        allowlist: impl Into<PathBuf>,
    ) -> Self {
        Self {
            scan: scan.into(),
            snapshot: snapshot.into(),
            allowlist: allowlist.into(),
        }
    }

    /// All three files under one directory, using the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(crate::app::config::DEFAULT_SCAN_FILE),
            dir.join(crate::app::config::DEFAULT_SNAPSHOT_FILE),
            dir.join(crate::app::config::DEFAULT_ALLOWLIST_FILE),
        )
    }
}

fn read_text(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "File not found, treating as empty");
            Ok(None)
        }
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_with(parser: RecordParser, path: &Path) -> Result<ParsedRecords, StoreError> {
    let parsed = match read_text(path)? {
        Some(text) => parser.parse_records(&text),
        None => ParsedRecords::default(),
    };
    debug!(
        path = %path.display(),
        kind = parser.kind(),
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "Read records"
    );
    Ok(parsed)
}

/// Read a scan or snapshot file.
pub fn read_records(path: &Path) -> Result<ParsedRecords, StoreError> {
    read_with(RecordParser::scan(), path)
}

/// Read the allowlist; only complete six-field lines are kept.
pub fn read_allowlist(path: &Path) -> Result<ParsedRecords, StoreError> {
    read_with(RecordParser::allowlist(), path)
}

/// Truncate the snapshot and write every record, statuses defaulted.
pub fn write_snapshot(path: &Path, records: &[NetworkRecord]) -> Result<(), StoreError> {
    let mut content = String::new();
    for record in records {
        content.push_str(&format_line(record));
        content.push('\n');
    }

    fs::write(path, content).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), records = records.len(), "Wrote snapshot");
    Ok(())
}

/// Append one line to the allowlist, creating the file if needed.
pub fn append_allowlist(path: &Path, record: &NetworkRecord) -> Result<(), StoreError> {
    let to_write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_write_error)?;
    writeln!(file, "{}", format_line(record)).map_err(to_write_error)?;

    debug!(path = %path.display(), bssid = %record.bssid, "Appended allowlist entry");
    Ok(())
}
