//! Export helpers for writing results to plain text and CSV files.
//!
//! - `write_report` writes the rendered report, one line per entry, replacing
//!   any existing file.
//! - `save_shared_hashes_csv` writes one `(hash, username)` row per member of
//!   every shared hash group.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;

use crate::analyze::ReuseReport;

#[derive(Debug, Serialize)]
struct SharedHashRow<'a> {
    #[serde(rename = "Hash")]
    hash: &'a str,
    #[serde(rename = "Username")]
    username: &'a str,
}

pub fn write_report<P: AsRef<Path>>(lines: &[String], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{line}").with_context(|| format!("write {}", path.display()))?;
    }
    out.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

pub fn save_shared_hashes_csv<P: AsRef<Path>>(report: &ReuseReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    if report.shared_groups.is_empty() {
        wtr.write_record(["Hash", "Username"])?;
    }
    for group in &report.shared_groups {
        for user in &group.users {
            wtr.serialize(SharedHashRow {
                hash: &group.hash,
                username: user,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
