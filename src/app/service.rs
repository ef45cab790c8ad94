use super::config::Command;
use super::notice::{Notice, NoticeBoard};
use crate::classifier::{Allowlist, Classifier, Reason, SnapshotIndex};
use crate::domain::{NetworkRecord, PatrolError};
use crate::store::{self, DataFiles};
use serde::Serialize;
use tracing::info;

/// Which scanned network an `allow` request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position in the displayed list
    Row(usize),
    /// Case-insensitive BSSID match, optionally narrowed by SSID
    Network { bssid: String, ssid: Option<String> },
}

impl Selection {
    pub fn find<'a>(&self, rows: &'a [ViewRow]) -> Option<&'a ViewRow> {
        match self {
            Selection::Row(row) => row.checked_sub(1).and_then(|index| rows.get(index)),
            Selection::Network { bssid, ssid } => {
                let bssid = bssid.trim().to_lowercase();
                let ssid = ssid.as_ref().map(|ssid| ssid.trim().to_lowercase());
                rows.iter().find(|row| {
                    row.record.bssid.trim().to_lowercase() == bssid
                        && ssid
                            .as_ref()
                            .is_none_or(|ssid| row.record.ssid.trim().to_lowercase() == *ssid)
                })
            }
        }
    }
}

/// One displayed row: the record with its effective status, plus the rule
/// that produced it when the row came out of the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    #[serde(flatten)]
    pub record: NetworkRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl ViewRow {
    fn displayed(mut record: NetworkRecord) -> Self {
        record.status = Some(record.effective_status());
        Self {
            record,
            reason: None,
        }
    }
}

/// What an operation leaves on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanView {
    pub rows: Vec<ViewRow>,
    pub status_message: String,
}

impl ScanView {
    fn new(rows: Vec<ViewRow>, status_message: impl Into<String>) -> Self {
        Self {
            rows,
            status_message: status_message.into(),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &NetworkRecord> {
        self.rows.iter().map(|row| &row.record)
    }
}

/// Scan, previous snapshot and allowlist as read at the start of an operation.
struct AnalysisInputs {
    scan: Vec<NetworkRecord>,
    snapshot: SnapshotIndex,
    allowlist: Allowlist,
}

impl AnalysisInputs {
    fn classify(&self) -> Vec<ViewRow> {
        Classifier::new(self.allowlist.clone(), self.snapshot.clone())
            .classify_all(self.scan.clone())
            .into_iter()
            .map(|(record, verdict)| ViewRow {
                record,
                reason: Some(verdict.reason),
            })
            .collect()
    }
}

/// Load → compare → classify → persist, over the three data files.
///
/// Failures never abort an operation: they become notices and the operation
/// continues with the data it could read.
pub struct PatrolService {
    files: DataFiles,
    notices: NoticeBoard,
}

impl PatrolService {
    pub fn new(files: DataFiles) -> Self {
        Self {
            files,
            notices: NoticeBoard::new(),
        }
    }

    pub fn files(&self) -> &DataFiles {
        &self.files
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    pub fn run(&mut self, command: &Command) -> Result<ScanView, PatrolError> {
        match command {
            Command::Show => Ok(self.load()),
            Command::Refresh => Ok(self.refresh_scan()),
            Command::Analyze => Ok(self.analyze()),
            Command::Allow(args) => {
                let selection = args
                    .selection()
                    .map_err(|e| PatrolError::Selection(e.to_string()))?;
                Ok(self.add_to_allowlist(&selection))
            }
        }
    }

    /// Present the scan file as-is.
    pub fn load(&mut self) -> ScanView {
        let rows: Vec<ViewRow> = self.read_scan().into_iter().map(ViewRow::displayed).collect();
        let message = format!("Loaded {} networks", rows.len());
        info!(networks = rows.len(), "Loaded scan");
        ScanView::new(rows, message)
    }

    /// Replace the snapshot with the current scan.
    pub fn refresh_scan(&mut self) -> ScanView {
        let records = self.read_scan();
        self.persist_snapshot(&records);
        info!(networks = records.len(), "Refreshed snapshot from scan");

        let rows = records.into_iter().map(ViewRow::displayed).collect();
        ScanView::new(rows, "Scan refreshed")
    }

    /// Classify the scan and persist the result as the new snapshot.
    pub fn analyze(&mut self) -> ScanView {
        let inputs = self.read_inputs();
        self.persist_analysis(&inputs)
    }

    /// Classify the scan without touching any file.
    pub fn preview(&mut self) -> ScanView {
        let rows = self.read_inputs().classify();
        let message = format!("Previewed {} networks", rows.len());
        ScanView::new(rows, message)
    }

    /// Append the selected network, with its current status, to the
    /// allowlist and re-run the analysis.
    ///
    /// The data files are read once, so each read failure is reported once.
    pub fn add_to_allowlist(&mut self, selection: &Selection) -> ScanView {
        let mut inputs = self.read_inputs();
        let rows = inputs.classify();

        let Some(row) = selection.find(&rows) else {
            self.notices.push(Notice::warning(
                Notice::NO_SELECTION,
                "Please select a network from the list to add to the allowlist.",
            ));
            return ScanView::new(rows, "No network selected");
        };
        let record = row.record.clone();

        if let Err(e) = store::append_allowlist(&self.files.allowlist, &record) {
            self.notices.push(Notice::error(
                Notice::FILE_WRITE_ERROR,
                format!("Error updating allowlist: {e}"),
            ));
            return ScanView::new(rows, "Allowlist unchanged");
        }

        info!(ssid = %record.ssid, bssid = %record.bssid, "Added network to allowlist");
        self.notices.push(Notice::info(
            Notice::ALLOWLIST_UPDATED,
            format!("Network '{}' added to allowlist.", record.ssid),
        ));

        inputs.allowlist.insert(&record.ssid, &record.bssid);
        self.persist_analysis(&inputs)
    }

    fn persist_analysis(&mut self, inputs: &AnalysisInputs) -> ScanView {
        let rows = inputs.classify();
        let records: Vec<NetworkRecord> = rows.iter().map(|row| row.record.clone()).collect();
        self.persist_snapshot(&records);
        ScanView::new(rows, "Analysis complete")
    }

    fn read_inputs(&mut self) -> AnalysisInputs {
        let scan = self.read_scan();
        // The snapshot must be read before anything overwrites it
        let snapshot = SnapshotIndex::from_records(self.read_snapshot());
        let allowlist = self.read_allowlist();
        AnalysisInputs {
            scan,
            snapshot,
            allowlist,
        }
    }

    fn read_scan(&mut self) -> Vec<NetworkRecord> {
        match store::read_records(&self.files.scan) {
            Ok(parsed) => parsed.records,
            Err(e) => {
                self.notices
                    .push(Notice::error(Notice::FILE_READ_ERROR, e.to_string()));
                Vec::new()
            }
        }
    }

    fn read_snapshot(&mut self) -> Vec<NetworkRecord> {
        match store::read_records(&self.files.snapshot) {
            Ok(parsed) => parsed.records,
            Err(e) => {
                self.notices
                    .push(Notice::error(Notice::FILE_READ_ERROR, e.to_string()));
                Vec::new()
            }
        }
    }

    fn read_allowlist(&mut self) -> Allowlist {
        match store::read_allowlist(&self.files.allowlist) {
            Ok(parsed) => Allowlist::from_records(&parsed.records),
            Err(e) => {
                self.notices.push(Notice::error(
                    Notice::ALLOWLIST_ERROR,
                    format!("Error reading allowlist: {e}"),
                ));
                Allowlist::new()
            }
        }
    }

    fn persist_snapshot(&mut self, records: &[NetworkRecord]) {
        if let Err(e) = store::write_snapshot(&self.files.snapshot, records) {
            self.notices
                .push(Notice::error(Notice::FILE_WRITE_ERROR, e.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NetworkStatus;

    fn rows() -> Vec<ViewRow> {
        [
            NetworkRecord::new("Home", "AA:BB:CC:DD:EE:FF", -45, 6, "WPA2"),
            NetworkRecord::new("Cafe", "11:22:33:44:55:66", -60, 11, "WPA2"),
            NetworkRecord::new("Cafe 5G", "11:22:33:44:55:66", -65, 36, "WPA2"),
        ]
        .into_iter()
        .map(ViewRow::displayed)
        .collect()
    }

    #[test]
    fn test_select_by_row_is_one_based() {
        let rows = rows();
        assert_eq!(Selection::Row(1).find(&rows).unwrap().record.ssid, "Home");
        assert_eq!(Selection::Row(3).find(&rows).unwrap().record.ssid, "Cafe 5G");
        assert!(Selection::Row(0).find(&rows).is_none());
        assert!(Selection::Row(4).find(&rows).is_none());
    }

    #[test]
    fn test_select_by_bssid_ignores_case() {
        let rows = rows();
        let selection = Selection::Network {
            bssid: "aa:bb:cc:dd:ee:ff".to_string(),
            ssid: None,
        };
        assert_eq!(selection.find(&rows).unwrap().record.ssid, "Home");
    }

    #[test]
    fn test_select_by_bssid_and_ssid() {
        let rows = rows();
        let selection = Selection::Network {
            bssid: "11:22:33:44:55:66".to_string(),
            ssid: Some("cafe 5g".to_string()),
        };
        assert_eq!(selection.find(&rows).unwrap().record.channel, 36);

        let first = Selection::Network {
            bssid: "11:22:33:44:55:66".to_string(),
            ssid: None,
        };
        assert_eq!(first.find(&rows).unwrap().record.channel, 11);
    }

    #[test]
    fn test_displayed_row_has_effective_status() {
        let row = ViewRow::displayed(NetworkRecord::new("Home", "AA", -45, 6, "WPA2"));
        assert_eq!(row.record.status, Some(NetworkStatus::UnknownSafe));
        assert!(row.reason.is_none());
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = ViewRow {
            record: NetworkRecord::new("Home", "AA", -45, 6, "Open")
                .with_status(NetworkStatus::UnknownSuspicious),
            reason: Some(Reason::WeakEncryption {
                encryption: "Open".to_string(),
            }),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["ssid"], "Home");
        assert_eq!(json["status"], "Unknown: Suspicious");
        assert_eq!(json["reason"]["rule"], "weak_encryption");
    }
}
