//! Parsing of NTDS export lines (`user:rid:lm_hash:nt_hash:::`).
//!
//! Only the account name (field 0) and the hash in field 3 are used. Lines
//! with fewer than four fields or an empty field 3 are rejected so callers can
//! skip them.
use crate::table::CredentialTable;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DitError {
    #[error("malformed line: {0}")]
    MalformedLine(String),
    #[error("empty password hash for account {0}")]
    EmptyHash(String),
}

/// Account name and password hash taken from one eligible line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitRecord<'a> {
    pub username: &'a str,
    pub hash: &'a str,
}

pub fn parse_dit_line(line: &str) -> Result<DitRecord<'_>, DitError> {
    let line = line.trim();
    // anything past the fourth field is ignored
    let fields: Vec<&str> = line.splitn(5, ':').collect();
    if fields.len() < 4 {
        return Err(DitError::MalformedLine(line.to_string()));
    }
    let (username, hash) = (fields[0], fields[3]);
    if hash.is_empty() {
        return Err(DitError::EmptyHash(username.to_string()));
    }
    Ok(DitRecord { username, hash })
}

/// Parse a whole in-memory dump, silently skipping rejected lines.
pub fn parse_dit_contents(contents: &str) -> CredentialTable {
    contents
        .lines()
        .filter_map(|line| parse_dit_line(line).ok())
        .map(|r| (r.username, r.hash))
        .collect()
}
