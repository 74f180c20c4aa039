//! Records produced from one capture dump.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::HardwareAddress;

/// BSSID value airodump writes for stations not associated with any AP.
pub const NOT_ASSOCIATED: &str = "(not associated)";

/// An access point observed by the capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPoint {
    pub mac: HardwareAddress,
    pub first_seen: DateTime<Local>,
    pub last_seen: DateTime<Local>,
    pub channel: i32,
    pub speed: String,
    pub privacy: String,
    pub authentication: String,
    /// Signal power in dBm.
    pub power: i32,
    /// Broadcast name; empty when hidden.
    pub essid: String,
}

/// A client station observed by the capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    pub mac: HardwareAddress,
    pub first_seen: DateTime<Local>,
    pub last_seen: DateTime<Local>,
    /// Signal power in dBm.
    pub power: i32,
    pub packets: u64,
    /// Associated AP address, or [`NOT_ASSOCIATED`].
    pub bssid: String,
    /// Probed network names, comma-joined.
    pub probes: String,
    /// Resolved organization; empty when unknown.
    pub organization: String,
}

impl Client {
    pub fn is_associated(&self) -> bool {
        self.bssid != NOT_ASSOCIATED
    }
}

/// One refresh cycle's worth of records.
///
/// A snapshot is immutable once built; newer cycles replace it wholesale.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// 0 until the first successful refresh.
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Local>>,
    pub access_points: Vec<AccessPoint>,
    pub clients: Vec<Client>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_bssid(bssid: &str) -> Client {
        let now = Local::now();
        Client {
            mac: HardwareAddress::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
            first_seen: now,
            last_seen: now,
            power: -40,
            packets: 12,
            bssid: bssid.to_string(),
            probes: String::new(),
            organization: String::new(),
        }
    }

    #[test]
    fn test_is_associated() {
        assert!(!client_with_bssid(NOT_ASSOCIATED).is_associated());
        assert!(client_with_bssid("00:14:6C:7E:40:80").is_associated());
    }

    #[test]
    fn test_default_snapshot_is_empty() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.refreshed_at.is_none());
        assert!(snapshot.access_points.is_empty());
        assert!(snapshot.clients.is_empty());
    }

    #[test]
    fn test_client_serializes_field_names() {
        let value = serde_json::to_value(client_with_bssid(NOT_ASSOCIATED)).unwrap();
        assert_eq!(value["mac"], "aa-bb-cc-dd-ee-ff");
        assert_eq!(value["power"], -40);
        assert_eq!(value["packets"], 12);
        assert_eq!(value["bssid"], NOT_ASSOCIATED);
        assert!(value.get("first_seen").is_some());
        assert!(value.get("organization").is_some());
    }
}
