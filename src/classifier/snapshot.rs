use crate::domain::{NetworkKey, NetworkRecord};
use std::collections::HashMap;

/// Previous snapshot keyed by `(BSSID, channel)`.
///
/// When the snapshot holds several records with the same key, the one that
/// appears last wins.
#[derive(Debug, Clone, Default)]
pub struct SnapshotIndex {
    by_key: HashMap<NetworkKey, NetworkRecord>,
}

impl SnapshotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = NetworkRecord>,
    {
        let by_key = records
            .into_iter()
            .map(|record| (record.key(), record))
            .collect();
        Self { by_key }
    }

    pub fn get(&self, key: &NetworkKey) -> Option<&NetworkRecord> {
        self.by_key.get(key)
    }

    /// The previous record for the same access point and channel, if its SSID
    /// or encryption no longer matches.
    pub fn changed(&self, record: &NetworkRecord) -> Option<&NetworkRecord> {
        self.get(&record.key()).filter(|previous| {
            previous.ssid != record.ssid || previous.encryption != record.encryption
        })
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
