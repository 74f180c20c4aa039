//! Hardware addresses as they appear in capture dumps.

use std::fmt;
use std::str::FromStr;

use macaddr::MacAddr6;
use serde::{Serialize, Serializer};

use crate::error::RowError;

/// Universal/Local bit of the first octet (IEEE 802).
const LOCAL_ADMIN_BIT: u8 = 0b0000_0010;

/// How an address was assigned, per its U/L bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Administration {
    /// Manufacturer-assigned; the prefix is an OUI.
    Universal,
    /// Locally administered; the prefix may be a CID.
    Local,
}

/// A 48-bit hardware address.
///
/// Accepts `aa:bb:cc:dd:ee:ff` and `aa-bb-cc-dd-ee-ff` in any case. Always
/// displayed in canonical form: lowercase byte-pairs joined by `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareAddress(MacAddr6);

impl HardwareAddress {
    pub const fn new(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8) -> Self {
        Self(MacAddr6::new(a, b, c, d, e, f))
    }

    pub fn octets(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// True when the U/L bit of the first octet is set.
    pub fn is_locally_administered(&self) -> bool {
        self.octets()[0] & LOCAL_ADMIN_BIT != 0
    }

    pub fn administration(&self) -> Administration {
        if self.is_locally_administered() {
            Administration::Local
        } else {
            Administration::Universal
        }
    }

    /// The first three octets in canonical form, e.g. `aa-bb-cc`.
    pub fn prefix(&self) -> String {
        let o = self.octets();
        format!("{:02x}-{:02x}-{:02x}", o[0], o[1], o[2])
    }
}

impl FromStr for HardwareAddress {
    type Err = RowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<MacAddr6>()
            .map(Self)
            .map_err(|_| RowError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.octets();
        write!(
            f,
            "{:02x}-{:02x}-{:02x}-{:02x}-{:02x}-{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl Serialize for HardwareAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn colon_form_normalizes_to_hyphens() {
            let addr: HardwareAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
            assert_eq!(addr.to_string(), "aa-bb-cc-dd-ee-ff");
        }

        #[test]
        fn uppercase_normalizes_to_lowercase() {
            let addr: HardwareAddress = "AA:BB:CC:DD:EE:FF".parse().unwrap();
            assert_eq!(addr.to_string(), "aa-bb-cc-dd-ee-ff");
        }

        #[test]
        fn hyphen_form_accepted() {
            let addr: HardwareAddress = "00-1A-2B-00-00-01".parse().unwrap();
            assert_eq!(addr, HardwareAddress::new(0x00, 0x1a, 0x2b, 0x00, 0x00, 0x01));
        }

        #[test]
        fn surrounding_whitespace_ignored() {
            let addr: HardwareAddress = " aa:bb:cc:dd:ee:ff ".parse().unwrap();
            assert_eq!(addr.to_string(), "aa-bb-cc-dd-ee-ff");
        }

        #[test]
        fn rejects_non_hex() {
            let err = "zz:bb:cc:dd:ee:ff".parse::<HardwareAddress>().unwrap_err();
            assert_eq!(err, RowError::InvalidAddress("zz:bb:cc:dd:ee:ff".to_string()));
        }

        #[test]
        fn rejects_short_address() {
            assert!("aa:bb:cc".parse::<HardwareAddress>().is_err());
        }

        #[test]
        fn rejects_empty() {
            assert!("".parse::<HardwareAddress>().is_err());
        }
    }

    mod classify_tests {
        use super::*;

        #[test]
        fn local_bit_set() {
            let addr: HardwareAddress = "02-00-00-00-00-01".parse().unwrap();
            assert!(addr.is_locally_administered());
            assert_eq!(addr.administration(), Administration::Local);
        }

        #[test]
        fn local_bit_clear() {
            let addr: HardwareAddress = "00-1A-2B-00-00-01".parse().unwrap();
            assert!(!addr.is_locally_administered());
            assert_eq!(addr.administration(), Administration::Universal);
        }

        #[test]
        fn multicast_bit_does_not_count() {
            // 0x01 is the I/G bit, not U/L
            let addr = HardwareAddress::new(0x01, 0, 0, 0, 0, 0);
            assert!(!addr.is_locally_administered());
        }

        #[test]
        fn randomized_client_address_is_local() {
            let addr: HardwareAddress = "DA:A1:19:00:00:01".parse().unwrap();
            assert!(addr.is_locally_administered());
        }
    }

    #[test]
    fn prefix_is_first_three_octets() {
        let addr: HardwareAddress = "AA:BB:CC:DD:EE:FF".parse().unwrap();
        assert_eq!(addr.prefix(), "aa-bb-cc");
        assert_eq!(addr.prefix().len(), 8);
    }

    #[test]
    fn serializes_as_canonical_string() {
        let addr = HardwareAddress::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"aa-bb-cc-dd-ee-ff\"");
    }
}
