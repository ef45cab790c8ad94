//! Static heuristics that label each scanned network.
//!
//! The decision list is evaluated top to bottom and the first rule that fires
//! wins:
//!
//! 1. allowlisted `(SSID, BSSID)` → `Known: Safe`
//! 2. open / WEP / WPA encryption → `Unknown: Suspicious`
//! 3. SSID contains a lure keyword → `Unknown: Suspicious`
//! 4. same `(BSSID, channel)` as a snapshot record whose SSID or encryption
//!    changed → `Unknown: Suspicious`
//! 5. otherwise → `Unknown: Safe`

mod allowlist;
mod rules;
mod snapshot;

pub use allowlist::Allowlist;
pub use rules::{Classifier, Reason, SUSPICIOUS_KEYWORDS, Verdict, WEAK_ENCRYPTIONS};
pub use snapshot::SnapshotIndex;
