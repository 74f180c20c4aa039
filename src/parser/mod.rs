//! Capture dump parsing module.
//!
//! Turns raw airodump-ng CSV text into domain records.

mod dump_parser;
mod fields;

pub use dump_parser::{DumpParser, ParsedDump, CLIENT_SECTION_HEADER};
pub use fields::{DumpZone, TIMESTAMP_FORMAT};
