//! Line readers for credential dumps.
//!
//! Large files are memory-mapped and split on `\n` with `memchr`; smaller ones
//! go through a buffered reader. Both strip a trailing `\r\n`/`\n` and decode
//! invalid UTF-8 lossily, so either path yields the same lines. The file (or
//! its mapping) is released when the [`Lines`] value is dropped.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use memmap2::Mmap;

/// Files at or above this size are memory-mapped.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

pub fn should_use_mmap(file_size_bytes: u64, threshold_bytes: u64) -> bool {
    file_size_bytes >= threshold_bytes
}

pub enum Lines {
    Buffered {
        reader: BufReader<File>,
        buf: Vec<u8>,
    },
    Mapped {
        map: Mmap,
        pos: usize,
    },
}

impl Lines {
    /// Open `path`, picking the mmap reader when its size reaches
    /// `threshold_bytes`.
    pub fn open<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let meta = file.metadata()?;
        if meta.is_file() && meta.len() > 0 && should_use_mmap(meta.len(), threshold_bytes) {
            debug!("mapping {} ({} bytes)", path.display(), meta.len());
            // SAFETY: the map is read-only and dropped with this value; a
            // concurrent truncation of the dump is outside what we support.
            let map = unsafe { Mmap::map(&file)? };
            Ok(Lines::Mapped { map, pos: 0 })
        } else {
            debug!("reading {} through a buffered reader", path.display());
            Ok(Lines::Buffered {
                reader: BufReader::new(file),
                buf: Vec::new(),
            })
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Lines::Mapped { .. })
    }
}

impl Iterator for Lines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Lines::Buffered { reader, buf } => {
                buf.clear();
                match reader.read_until(b'\n', buf) {
                    Ok(0) => None,
                    Ok(_) => Some(Ok(decode_line(buf))),
                    Err(e) => Some(Err(e)),
                }
            }
            Lines::Mapped { map, pos } => {
                let data: &[u8] = map;
                if *pos >= data.len() {
                    return None;
                }
                let rest = &data[*pos..];
                let end = memchr::memchr(b'\n', rest).map_or(rest.len(), |off| off + 1);
                *pos += end;
                Some(Ok(decode_line(&rest[..end])))
            }
        }
    }
}

// Only `\n` ends a line; a lone `\r` (classic Mac endings) stays inside it.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
