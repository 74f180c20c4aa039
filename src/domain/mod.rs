//! Domain types for capture dumps.
//!
//! These types are independent of how dumps are read or served.

mod address;
mod records;

pub use address::{Administration, HardwareAddress};
pub use records::{AccessPoint, Client, Snapshot, NOT_ASSOCIATED};
