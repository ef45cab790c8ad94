//! Domain layer for wi-patrol.
//!
//! Contains the canonical types shared across all modules:
//! - `NetworkRecord`: One observed wireless network, as read from or written to a data file
//! - `NetworkKey`: The `(BSSID, channel)` pair used to match a record against the snapshot
//! - `NetworkStatus`: The classification label attached to a record
//! - `PatrolError`: Top-level error type

pub mod error;
pub mod network;
pub mod status;

pub use error::PatrolError;
pub use network::{NetworkKey, NetworkRecord};
pub use status::NetworkStatus;
