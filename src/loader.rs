//! Loader: turns a credential dump into a [`CredentialTable`], counting what
//! was skipped along the way.
//!
//! Typical usage:
//!
//! ```no_run
//! use blastradius::{analyze::analyze, loader::load, report::render_lines};
//! # fn main() -> anyhow::Result<()> {
//! let outcome = load("/path/to/ntds.txt")?;
//! let report = analyze(&outcome.table)?;
//! for line in render_lines(&report) {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
use std::path::{Path, PathBuf};

use log::debug;

use crate::dit::{DitError, parse_dit_line};
use crate::io::{DEFAULT_MMAP_THRESHOLD_BYTES, Lines};
use crate::table::CredentialTable;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Line counters gathered while loading. Purely diagnostic.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub accepted: usize,
    pub malformed: usize,
    pub empty_hash: usize,
    pub overwritten: usize,
}

#[derive(Debug, Default, Clone)]
pub struct LoadOutcome {
    pub table: CredentialTable,
    pub stats: ParseStats,
}

impl LoadOutcome {
    fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;
        match parse_dit_line(line) {
            Ok(record) => {
                self.stats.accepted += 1;
                if let Some(previous) = self.table.insert(record.username, record.hash) {
                    self.stats.overwritten += 1;
                    debug!(
                        "{} seen again, replacing hash {} with {}",
                        record.username, previous, record.hash
                    );
                }
            }
            Err(DitError::MalformedLine(_)) => self.stats.malformed += 1,
            Err(DitError::EmptyHash(_)) => self.stats.empty_hash += 1,
        }
    }
}

/// Load a dump already held in memory.
pub fn load_from_str(contents: &str) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    for line in contents.lines() {
        outcome.push_line(line);
    }
    outcome
}

/// Stream a dump from disk, memory-mapping it when it is at least
/// `mmap_threshold_bytes` large.
pub fn load_with_threshold<P: AsRef<Path>>(
    path: P,
    mmap_threshold_bytes: u64,
) -> Result<LoadOutcome, LoadError> {
    let path = path.as_ref();
    let lines = Lines::open(path, mmap_threshold_bytes).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut outcome = LoadOutcome::default();
    for line in lines {
        let line = line.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        outcome.push_line(&line);
    }
    debug!(
        "loaded {} accounts from {} ({:?})",
        outcome.table.len(),
        path.display(),
        outcome.stats
    );
    Ok(outcome)
}

/// Convenience wrapper that uses the default mmap threshold.
pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadOutcome, LoadError> {
    load_with_threshold(path, DEFAULT_MMAP_THRESHOLD_BYTES)
}
