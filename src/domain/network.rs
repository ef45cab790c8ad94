use super::status::NetworkStatus;
use serde::{Deserialize, Serialize};

/// One observed wireless network.
///
/// This is the canonical representation of a row throughout the pipeline,
/// from the scan file through classification to the snapshot and allowlist.
/// The BSSID is kept as untyped text; nothing checks that it is a MAC address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub ssid: String,
    pub bssid: String,
    pub rssi: i32,
    pub channel: i32,
    pub encryption: String,
    #[serde(default)]
    pub status: Option<NetworkStatus>,
}

impl NetworkRecord {
    pub fn new(
        ssid: impl Into<String>,
        bssid: impl Into<String>,
        rssi: i32,
        channel: i32,
        encryption: impl Into<String>,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            bssid: bssid.into(),
            rssi,
            channel,
            encryption: encryption.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: NetworkStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The status as displayed and persisted: records without one are `Unknown: Safe`.
    pub fn effective_status(&self) -> NetworkStatus {
        self.status.clone().unwrap_or_default()
    }

    pub fn key(&self) -> NetworkKey {
        NetworkKey {
            bssid: self.bssid.clone(),
            channel: self.channel,
        }
    }
}

/// Snapshot lookup key. BSSID text is compared exactly, without case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkKey {
    pub bssid: String,
    pub channel: i32,
}
