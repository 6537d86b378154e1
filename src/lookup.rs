//! Symbol↔name cross-reference for chemical elements.
//!
//! Built once from a mapping file of alternating `symbol`, `name` lines and
//! immutable afterwards, so one table can be shared by reference across any
//! number of concurrently processed documents.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One symbol/name pair from the element mapping file.
///
/// The name is stored lower-cased; only the symbol's original case is ever
/// surfaced in output features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementEntry {
    /// Element symbol, original case (`Na`).
    pub symbol: String,
    /// Element name, lower case (`sodium`).
    pub name: String,
}

/// Immutable symbol↔name cross-reference.
///
/// Duplicate keys resolve to the first occurrence in file order: earlier
/// entries shadow later ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupTable {
    entries: Vec<ElementEntry>,
}

impl LookupTable {
    /// Build a table from a mapping file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLoad`] if the file cannot be read or violates the
    /// alternating `symbol`, `name` line structure.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::data_load(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    /// Build a table from any reader carrying the mapping file format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLoad`] on read failure or structural violations.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::data_load(format!("cannot read element map: {e}")))?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self> {
        // UTF-8 byte-order mark is tolerated on the first line
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().map(str::trim).collect();

        if lines.is_empty() {
            return Err(Error::data_load("element map is empty"));
        }
        if lines.len() % 2 != 0 {
            return Err(Error::data_load(format!(
                "line {} has no matching name line",
                lines.len()
            )));
        }

        let mut entries = Vec::with_capacity(lines.len() / 2);
        for (index, pair) in lines.chunks_exact(2).enumerate() {
            let (symbol, name) = (pair[0], pair[1]);
            if symbol.is_empty() || name.is_empty() {
                return Err(Error::data_load(format!(
                    "blank line in entry {} (lines {}-{})",
                    index + 1,
                    index * 2 + 1,
                    index * 2 + 2
                )));
            }
            entries.push(ElementEntry {
                symbol: symbol.to_string(),
                name: name.to_lowercase(),
            });
        }

        Ok(Self { entries })
    }

    /// Look up an element name by its symbol. Exact-match scan, first match
    /// wins.
    #[must_use]
    pub fn by_symbol(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.name.as_str())
    }

    /// Look up an element symbol by name. Matched against the lower-cased
    /// form of `name`, first match wins.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&str> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.name == wanted)
            .map(|e| e.symbol.as_str())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View the entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[ElementEntry] {
        &self.entries
    }
}
