//! airboard - airodump-ng dump watcher.
//!
//! Periodically parses the CSV dump written by airodump-ng into access
//! point and client records, resolves each client's organization from the
//! IEEE OUI and CID registries, and keeps the latest snapshot available to
//! concurrent readers.

pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod parser;
pub mod refresh;
pub mod registry;
pub mod routes;
pub mod snapshot;

pub use domain::{AccessPoint, Administration, Client, HardwareAddress, Snapshot};
pub use error::{AppError, AppResult, DumpError, RefreshError, RowError};
pub use filter::RecencyFilter;
pub use parser::{DumpParser, DumpZone, ParsedDump};
pub use refresh::RefreshScheduler;
pub use registry::OrganizationRegistry;
pub use snapshot::SnapshotStore;
