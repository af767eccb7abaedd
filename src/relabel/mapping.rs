//! Code-to-name translation table loaded from a `code,name` file.
//!
//! # Format
//! One entry per line, `code,name`. Only the first comma separates, so names
//! may contain commas. There is no header row and no quoting. Trailing
//! whitespace (including `\r`) is stripped from every line.
//!
//! # Validation
//! Loading never fails on content, each problem is local to its line:
//! * Blank lines are skipped
//! * Lines without a comma are skipped with a warning
//! * Lines with an empty code or an empty name are skipped silently
//! * A line whose code is already the name of an accepted entry is rejected
//!   with an error, otherwise relabeling could chain `A → B → C`
//! * A repeated code overwrites the earlier entry

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, trace, warn};

/// Separator between code and name.
const SEPARATOR: char = ',';

// =#========================================================================#=
// MAPPING ERROR
// =#========================================================================#=
/// Fatal errors while loading a [MappingTable].
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Could not open mapping file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read mapping source at line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Mapping source is not valid UTF-8 at line {line}")]
    Encoding { line: usize },
}

// =#========================================================================#=
// LOAD STATS
// =#========================================================================#=
/// Line counts collected while loading a [MappingTable].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines that were inserted into the table (including overwrites)
    pub accepted: usize,
    /// Lines without a separator
    pub malformed: usize,
    /// Lines with an empty code or empty name
    pub incomplete: usize,
    /// Lines rejected because their code is already a mapped name
    pub rejected_cycles: usize,
    /// Accepted lines that replaced an earlier entry with the same code
    pub overwritten: usize,
}

// =#========================================================================#=
// MAPPING TABLE
// =#========================================================================#=
/// Immutable code → name mapping.
///
/// Built once from a full read of the source, then only consulted.
/// Entries keep the order of first appearance in the source.
///
/// # Example
/// ```
/// use newick_relabel::relabel::MappingTable;
///
/// let source = "A,Homo sapiens\nB,Pan troglodytes, chimpanzee\nHomo sapiens,C\n";
/// let table = MappingTable::load(source.as_bytes()).unwrap();
///
/// assert_eq!(table.lookup("A"), Some("Homo sapiens"));
/// assert_eq!(table.lookup("B"), Some("Pan troglodytes, chimpanzee"));
/// assert_eq!(table.lookup("Homo sapiens"), None);
/// assert_eq!(table.load_stats().rejected_cycles, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: IndexMap<String, String>,
    load_stats: LoadStats,
}

impl MappingTable {
    /// Opens and loads the mapping file at `path`.
    ///
    /// # Errors
    /// Returns a [MappingError] if the file cannot be opened, read or decoded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MappingError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading mapping file");
        Self::load(BufReader::new(file))
    }

    /// Loads a mapping from line-oriented `code,name` text.
    ///
    /// See the [module documentation](self) for how each line is validated.
    /// An empty result is valid but logged as warning.
    ///
    /// # Errors
    /// Returns a [MappingError] only if reading fails or the text is not UTF-8.
    pub fn load<R: BufRead>(reader: R) -> Result<Self, MappingError> {
        let mut builder = TableBuilder::default();

        for (i, line) in reader.lines().enumerate() {
            let line_number = i + 1;
            let line = line.map_err(|source| {
                if source.kind() == io::ErrorKind::InvalidData {
                    MappingError::Encoding { line: line_number }
                } else {
                    MappingError::Read {
                        line: line_number,
                        source,
                    }
                }
            })?;
            builder.add_line(line_number, line.trim_end());
        }

        let table = builder.finish();
        if table.is_empty() {
            warn!("mapping table is empty, trees will be written without relabeling");
        } else {
            debug!(entries = table.len(), stats = ?table.load_stats, "mapping table loaded");
        }
        Ok(table)
    }

    /// Returns the name mapped to `code`, if any.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Returns `true` if `code` has a mapping.
    pub fn contains_code(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all codes in order of first appearance.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns all `(code, name)` entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Returns the line counts of loading this table.
    pub fn load_stats(&self) -> &LoadStats {
        &self.load_stats
    }
}

// ============================================================================
// Building
// ============================================================================
/// Accumulates entries while tracking which names are in use.
#[derive(Default)]
struct TableBuilder {
    entries: IndexMap<String, String>,
    /// How many entries currently map to each name
    name_uses: HashMap<String, usize>,
    stats: LoadStats,
}

impl TableBuilder {
    /// Validates one line and inserts it.
    ///
    /// Only codes that are already mapped names are rejected. The reverse
    /// order (`X,Y` then `A,X`) is accepted, so a name may still turn up as
    /// a code key. Relabeling is a single pass, so this never chains.
    fn add_line(&mut self, line_number: usize, line: &str) {
        // Blank lines are padding, not malformed entries
        if line.is_empty() {
            trace!(line = line_number, "blank mapping line skipped");
            return;
        }

        let Some((code, name)) = line.split_once(SEPARATOR) else {
            warn!(line = line_number, content = line, "malformed mapping line without ',' skipped");
            self.stats.malformed += 1;
            return;
        };

        if code.is_empty() || name.is_empty() {
            trace!(line = line_number, "mapping line with empty code or name skipped");
            self.stats.incomplete += 1;
            return;
        }

        if self.name_uses.contains_key(code) {
            let mapped_from = self
                .entries
                .iter()
                .find(|(_, existing)| existing.as_str() == code)
                .map(|(existing_code, _)| existing_code.as_str())
                .unwrap_or_default();
            error!(
                line = line_number,
                code,
                name,
                mapped_from,
                "mapping code is already a mapped name, entry rejected to prevent a relabeling loop"
            );
            self.stats.rejected_cycles += 1;
            return;
        }

        if let Some(previous) = self.entries.insert(code.to_string(), name.to_string()) {
            debug!(line = line_number, code, previous = %previous, name, "mapping code redefined");
            self.release_name(&previous);
            self.stats.overwritten += 1;
        }
        *self.name_uses.entry(name.to_string()).or_default() += 1;
        self.stats.accepted += 1;
    }

    fn release_name(&mut self, name: &str) {
        if let Some(uses) = self.name_uses.get_mut(name) {
            *uses -= 1;
            if *uses == 0 {
                self.name_uses.remove(name);
            }
        }
    }

    fn finish(self) -> MappingTable {
        MappingTable {
            entries: self.entries,
            load_stats: self.stats,
        }
    }
}
