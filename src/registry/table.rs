//! Prefix tables parsed from IEEE registry text files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

/// Substring that marks a registry record line.
const RECORD_MARKER: &str = "(hex)";

/// `00-22-72   (hex)\t\tAmerican Micro-Fuel Device Corp.`
static OUI_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9A-Fa-f]{2}-[0-9A-Fa-f]{2}-[0-9A-Fa-f]{2}) {3}\(hex\)\t\t(.*)$")
        .expect("OUI line pattern is valid")
});

/// `0A-00-00                      (hex)                         Some Company`
static CID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9A-Fa-f]{2}-[0-9A-Fa-f]{2}-[0-9A-Fa-f]{2})[ \t]+\(hex\)[ \t]+(.*)$")
        .expect("CID line pattern is valid")
});

/// Layout of a registry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    /// Globally-assigned prefixes (`oui.txt`).
    Oui,
    /// Locally-administered company identifiers (`cid.txt`).
    Cid,
}

impl RegistryFormat {
    fn line_pattern(self) -> &'static Regex {
        match self {
            RegistryFormat::Oui => &OUI_LINE,
            RegistryFormat::Cid => &CID_LINE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RegistryFormat::Oui => "OUI",
            RegistryFormat::Cid => "CID",
        }
    }
}

/// Mapping from canonical prefix (`aa-bb-cc`) to organization name.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    entries: HashMap<String, String>,
}

impl PrefixTable {
    /// Parse registry text. Lines without the `(hex)` marker are ignored.
    pub fn parse(text: &str, format: RegistryFormat) -> Self {
        let pattern = format.line_pattern();
        let mut entries = HashMap::new();

        for line in text.lines() {
            if !line.contains(RECORD_MARKER) {
                continue;
            }

            match parse_record_line(line, pattern) {
                Some((prefix, name)) => {
                    entries.insert(prefix, name);
                }
                None => debug!("Skipping malformed {} line: {:?}", format.name(), line),
            }
        }

        Self { entries }
    }

    /// Load a registry file. An unreadable file yields an empty table.
    pub fn load(path: &Path, format: RegistryFormat) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                let table = Self::parse(&String::from_utf8_lossy(&bytes), format);
                info!(
                    "Loaded {} {} entries from {:?}",
                    table.len(),
                    format.name(),
                    path
                );
                table
            }
            Err(e) => {
                warn!(
                    "Failed to read {} registry {:?}: {}; organization lookups will miss",
                    format.name(),
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Look up a canonical prefix. Case-insensitive.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .get(&prefix.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_record_line(line: &str, pattern: &Regex) -> Option<(String, String)> {
    let captures = pattern.captures(line)?;
    let prefix = captures.get(1)?.as_str().to_ascii_lowercase();
    let name = captures.get(2)?.as_str().trim().to_string();
    Some((prefix, name))
}
