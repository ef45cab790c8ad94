use crate::domain::NetworkRecord;

/// User-curated set of known-safe networks.
///
/// Matching folds case and trims surrounding whitespace on both SSID and
/// BSSID. The other fields of an allowlist entry are stored but never compared.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    entries: Vec<(String, String)>,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NetworkRecord>,
    {
        let mut allowlist = Self::new();
        for record in records {
            allowlist.insert(&record.ssid, &record.bssid);
        }
        allowlist
    }

    pub fn insert(&mut self, ssid: &str, bssid: &str) {
        self.entries.push((normalize(ssid), normalize(bssid)));
    }

    pub fn contains(&self, record: &NetworkRecord) -> bool {
        let ssid = normalize(&record.ssid);
        let bssid = normalize(&record.bssid);
        self.entries
            .iter()
            .any(|(allowed_ssid, allowed_bssid)| *allowed_ssid == ssid && *allowed_bssid == bssid)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
