//! airodump-ng CSV dump parser.
//!
//! A dump holds two CSV tables back to back: access points first, then
//! client stations. The client table starts at a fixed header line.

use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use super::fields::{
    column, is_blank, parse_integer, parse_timestamp, require_columns, DumpZone,
};
use crate::domain::{AccessPoint, Client, HardwareAddress};
use crate::error::{DumpError, RowError};
use crate::registry::OrganizationRegistry;

/// Header line that separates the access point table from the client table.
pub const CLIENT_SECTION_HEADER: &str =
    "Station MAC, First time seen, Last time seen, Power, # packets, BSSID, Probed ESSIDs";

/// First field of the access point table's header row.
const ACCESS_POINT_HEADER_FIELD: &str = "BSSID";

const ACCESS_POINT_COLUMNS: usize = 14;
const CLIENT_COLUMNS: usize = 7;

/// Records parsed from one dump, plus how many rows were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDump {
    pub access_points: Vec<AccessPoint>,
    pub clients: Vec<Client>,
    pub skipped_access_points: usize,
    pub skipped_clients: usize,
}

/// Parses dumps and enriches clients with their organization.
#[derive(Debug, Clone)]
pub struct DumpParser {
    registry: Arc<OrganizationRegistry>,
    zone: DumpZone,
}

impl DumpParser {
    /// Create a parser that reads timestamps in the local time zone.
    pub fn new(registry: Arc<OrganizationRegistry>) -> Self {
        Self {
            registry,
            zone: DumpZone::Local,
        }
    }

    /// Set the time zone dump timestamps were written in.
    pub fn with_zone(mut self, zone: DumpZone) -> Self {
        self.zone = zone;
        self
    }

    /// Parse a complete dump.
    ///
    /// Fails only when the client section header is missing. Malformed rows
    /// are logged and left out of the result.
    pub fn parse(&self, text: &str) -> Result<ParsedDump, DumpError> {
        let (ap_section, client_section) = split_sections(text)?;

        let (access_points, skipped_access_points) =
            read_section(ap_section, "access point", |record| {
                if column(record, 0) == ACCESS_POINT_HEADER_FIELD {
                    return Ok(None);
                }
                self.access_point_from_record(record).map(Some)
            });

        let (clients, skipped_clients) = read_section(client_section, "client", |record| {
            self.client_from_record(record).map(Some)
        });

        debug!(
            "Parsed {} access points ({} skipped), {} clients ({} skipped)",
            access_points.len(),
            skipped_access_points,
            clients.len(),
            skipped_clients
        );

        Ok(ParsedDump {
            access_points,
            clients,
            skipped_access_points,
            skipped_clients,
        })
    }

    fn access_point_from_record(&self, record: &StringRecord) -> Result<AccessPoint, RowError> {
        require_columns(record, ACCESS_POINT_COLUMNS)?;

        Ok(AccessPoint {
            mac: column(record, 0).parse::<HardwareAddress>()?,
            first_seen: parse_timestamp(column(record, 1), "first_seen", self.zone)?,
            last_seen: parse_timestamp(column(record, 2), "last_seen", self.zone)?,
            channel: parse_integer(column(record, 3), "channel")?,
            speed: column(record, 4).to_string(),
            privacy: column(record, 5).to_string(),
            authentication: column(record, 7).to_string(),
            power: parse_integer(column(record, 8), "power")?,
            essid: column(record, 13).to_string(),
        })
    }

    fn client_from_record(&self, record: &StringRecord) -> Result<Client, RowError> {
        require_columns(record, CLIENT_COLUMNS)?;

        let mac = column(record, 0).parse::<HardwareAddress>()?;
        let first_seen = parse_timestamp(column(record, 1), "first_seen", self.zone)?;
        let last_seen = parse_timestamp(column(record, 2), "last_seen", self.zone)?;
        let power = parse_integer(column(record, 3), "power")?;
        let packets = parse_integer(column(record, 4), "packets")?;

        // Probed ESSIDs are written unquoted, so extra names spill into
        // the columns after the last header.
        let probes = record
            .iter()
            .skip(CLIENT_COLUMNS - 1)
            .map(str::trim_start)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        Ok(Client {
            organization: self.registry.resolve(&mac),
            mac,
            first_seen,
            last_seen,
            power,
            packets,
            bssid: column(record, 5).to_string(),
            probes,
        })
    }
}

/// Split a dump at the client section header.
fn split_sections(text: &str) -> Result<(&str, &str), DumpError> {
    let start = text
        .find(CLIENT_SECTION_HEADER)
        .ok_or(DumpError::MissingClientSection)?;
    let end = start + CLIENT_SECTION_HEADER.len();
    Ok((&text[..start], &text[end..]))
}

/// Read every row of one table, keeping rows `build` accepts.
///
/// `build` returns `Ok(None)` for rows to drop silently (headers). Returns the
/// records and the number of rows skipped as malformed.
fn read_section<T, F>(section: &str, kind: &str, mut build: F) -> (Vec<T>, usize)
where
    F: FnMut(&StringRecord) -> Result<Option<T>, RowError>,
{
    // airodump-ng never quotes, so a '"' inside an ESSID is literal text
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(section.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable {} row: {}", kind, e);
                skipped += 1;
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        match build(&record) {
            Ok(Some(item)) => records.push(item),
            Ok(None) => {}
            Err(e) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                warn!("Skipping {} row at section line {}: {}", kind, line, e);
                skipped += 1;
            }
        }
    }

    (records, skipped)
}
