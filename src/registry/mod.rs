//! Organization lookup for hardware addresses.
//!
//! Two static tables are built once at startup: the OUI registry for
//! manufacturer-assigned addresses and the CID registry for locally
//! administered ones. The address's U/L bit picks the table.

mod table;

pub use table::{PrefixTable, RegistryFormat};

use std::path::Path;

use crate::domain::{Administration, HardwareAddress};

/// Organization reported for a local address whose prefix is not a known CID.
pub const LOCAL_FALLBACK: &str = "LOCAL";

/// Immutable OUI and CID lookup tables.
#[derive(Debug, Clone, Default)]
pub struct OrganizationRegistry {
    oui: PrefixTable,
    cid: PrefixTable,
}

impl OrganizationRegistry {
    pub fn new(oui: PrefixTable, cid: PrefixTable) -> Self {
        Self { oui, cid }
    }

    /// Load both registries from disk. Unreadable files leave that table empty.
    pub fn load(oui_path: &Path, cid_path: &Path) -> Self {
        Self {
            oui: PrefixTable::load(oui_path, RegistryFormat::Oui),
            cid: PrefixTable::load(cid_path, RegistryFormat::Cid),
        }
    }

    pub fn oui(&self) -> &PrefixTable {
        &self.oui
    }

    pub fn cid(&self) -> &PrefixTable {
        &self.cid
    }

    /// Resolve the organization behind an address.
    ///
    /// Local addresses fall back to [`LOCAL_FALLBACK`]; universal addresses
    /// with an unknown OUI resolve to an empty string.
    pub fn resolve(&self, address: &HardwareAddress) -> String {
        let prefix = address.prefix();
        match address.administration() {
            Administration::Local => match self.cid.get(&prefix) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => LOCAL_FALLBACK.to_string(),
            },
            Administration::Universal => self.oui.get(&prefix).unwrap_or_default().to_string(),
        }
    }
}
