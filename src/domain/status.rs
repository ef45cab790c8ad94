use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification label attached to a network record.
///
/// The three well-known labels are produced by the classifier. Any other
/// non-empty label found in a data file is kept verbatim in `Other` so that a
/// load/save cycle never rewrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NetworkStatus {
    KnownSafe,
    #[default]
    UnknownSafe,
    UnknownSuspicious,
    Other(String),
}

impl NetworkStatus {
    pub const KNOWN_SAFE: &'static str = "Known: Safe";
    pub const UNKNOWN_SAFE: &'static str = "Unknown: Safe";
    pub const UNKNOWN_SUSPICIOUS: &'static str = "Unknown: Suspicious";

    pub fn label(&self) -> &str {
        match self {
            NetworkStatus::KnownSafe => Self::KNOWN_SAFE,
            NetworkStatus::UnknownSafe => Self::UNKNOWN_SAFE,
            NetworkStatus::UnknownSuspicious => Self::UNKNOWN_SUSPICIOUS,
            NetworkStatus::Other(label) => label,
        }
    }

    /// Parse an optional status field. Empty fields mean "no status".
    pub fn from_field(field: &str) -> Option<Self> {
        if field.is_empty() {
            None
        } else {
            Some(Self::from(field.to_string()))
        }
    }

    pub fn is_suspicious(&self) -> bool {
        matches!(self, NetworkStatus::UnknownSuspicious)
    }
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for NetworkStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            Self::KNOWN_SAFE => NetworkStatus::KnownSafe,
            Self::UNKNOWN_SAFE => NetworkStatus::UnknownSafe,
            Self::UNKNOWN_SUSPICIOUS => NetworkStatus::UnknownSuspicious,
            _ => NetworkStatus::Other(label),
        }
    }
}

impl From<NetworkStatus> for String {
    fn from(status: NetworkStatus) -> Self {
        match status {
            NetworkStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl FromStr for NetworkStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip() {
        for label in ["Known: Safe", "Unknown: Safe", "Unknown: Suspicious"] {
            let status: NetworkStatus = label.parse().unwrap();
            assert!(!matches!(status, NetworkStatus::Other(_)));
            assert_eq!(status.label(), label);
        }
    }

    #[test]
    fn test_foreign_label_is_preserved() {
        let status = NetworkStatus::from("Rogue AP".to_string());
        assert_eq!(status, NetworkStatus::Other("Rogue AP".to_string()));
        assert_eq!(status.to_string(), "Rogue AP");
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        // Only the exact spelling written by the classifier maps to a known variant
        let status = NetworkStatus::from("known: safe".to_string());
        assert_eq!(status, NetworkStatus::Other("known: safe".to_string()));
    }

    #[test]
    fn test_empty_field_means_no_status() {
        assert_eq!(NetworkStatus::from_field(""), None);
        assert_eq!(
            NetworkStatus::from_field("Unknown: Suspicious"),
            Some(NetworkStatus::UnknownSuspicious)
        );
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&NetworkStatus::KnownSafe).unwrap();
        assert_eq!(json, "\"Known: Safe\"");
        let back: NetworkStatus = serde_json::from_str("\"Unknown: Suspicious\"").unwrap();
        assert_eq!(back, NetworkStatus::UnknownSuspicious);
    }
}
