use super::{Allowlist, SnapshotIndex};
use crate::domain::{NetworkRecord, NetworkStatus};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Encryption labels considered weak. Compared against the lowercased field.
pub const WEAK_ENCRYPTIONS: [&str; 3] = ["open", "wep", "wpa"];

/// SSID substrings typical of lure networks. Compared against the lowercased SSID.
pub const SUSPICIOUS_KEYWORDS: [&str; 4] = ["free", "guest", "public", "fake"];

/// Which rule decided a record's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Reason {
    Allowlisted,
    WeakEncryption {
        encryption: String,
    },
    SuspiciousKeyword {
        keyword: &'static str,
    },
    SnapshotMismatch {
        previous_ssid: String,
        previous_encryption: String,
    },
    NoFinding,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Allowlisted => write!(f, "on allowlist"),
            Reason::WeakEncryption { encryption } => write!(f, "weak encryption '{encryption}'"),
            Reason::SuspiciousKeyword { keyword } => write!(f, "SSID contains '{keyword}'"),
            Reason::SnapshotMismatch {
                previous_ssid,
                previous_encryption,
            } => write!(
                f,
                "changed since last snapshot (was '{previous_ssid}' / '{previous_encryption}')"
            ),
            Reason::NoFinding => write!(f, "no finding"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: NetworkStatus,
    pub reason: Reason,
}

impl Verdict {
    fn new(status: NetworkStatus, reason: Reason) -> Self {
        Self { status, reason }
    }
}

/// First-match-wins decision list over an allowlist and a previous snapshot.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    allowlist: Allowlist,
    snapshot: SnapshotIndex,
}

impl Classifier {
    pub fn new(allowlist: Allowlist, snapshot: SnapshotIndex) -> Self {
        Self {
            allowlist,
            snapshot,
        }
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn snapshot(&self) -> &SnapshotIndex {
        &self.snapshot
    }

    pub fn classify(&self, record: &NetworkRecord) -> Verdict {
        if self.allowlist.contains(record) {
            return Verdict::new(NetworkStatus::KnownSafe, Reason::Allowlisted);
        }

        let encryption = record.encryption.to_lowercase();
        if WEAK_ENCRYPTIONS.iter().any(|weak| encryption == *weak) {
            return Verdict::new(
                NetworkStatus::UnknownSuspicious,
                Reason::WeakEncryption {
                    encryption: record.encryption.clone(),
                },
            );
        }

        let ssid = record.ssid.to_lowercase();
        if let Some(keyword) = SUSPICIOUS_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| ssid.contains(keyword))
        {
            return Verdict::new(
                NetworkStatus::UnknownSuspicious,
                Reason::SuspiciousKeyword { keyword },
            );
        }

        if let Some(previous) = self.snapshot.changed(record) {
            return Verdict::new(
                NetworkStatus::UnknownSuspicious,
                Reason::SnapshotMismatch {
                    previous_ssid: previous.ssid.clone(),
                    previous_encryption: previous.encryption.clone(),
                },
            );
        }

        Verdict::new(NetworkStatus::UnknownSafe, Reason::NoFinding)
    }

    /// Classify every record in order, returning each with its status set.
    pub fn classify_all(&self, records: Vec<NetworkRecord>) -> Vec<(NetworkRecord, Verdict)> {
        let classified: Vec<(NetworkRecord, Verdict)> = records
            .into_iter()
            .map(|record| {
                let verdict = self.classify(&record);
                debug!(
                    ssid = %record.ssid,
                    bssid = %record.bssid,
                    status = %verdict.status,
                    reason = %verdict.reason,
                    "Classified network"
                );
                (record.with_status(verdict.status.clone()), verdict)
            })
            .collect();

        let suspicious = classified
            .iter()
            .filter(|(_, verdict)| verdict.status.is_suspicious())
            .count();
        info!(
            networks = classified.len(),
            suspicious,
            allowlist_entries = self.allowlist.len(),
            snapshot_entries = self.snapshot.len(),
            "Classification finished"
        );
        classified
    }
}
