//! Blocking access to the three flat data files.
//!
//! - scan source: read only
//! - snapshot: read, then overwritten wholesale
//! - allowlist: read, append only
//!
//! Missing files read as empty. Every other I/O failure is returned as a
//! `StoreError` so the caller can surface it as a notice.

mod files;

pub use files::{DataFiles, append_allowlist, read_allowlist, read_records, write_snapshot};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            StoreError::Read { path, .. } | StoreError::Write { path, .. } => path,
        }
    }
}
