//! Memory Estimate Module
//!
//! Best-effort footprint approximation for the stats report. The figure is
//! for operators only and never feeds into eviction.

use std::io;
use std::mem::size_of;

use serde::Serialize;
use tracing::trace;

use crate::cache::CacheEntry;

// Counts bytes written without buffering them.
#[derive(Default)]
struct ByteCounter {
    bytes: u64,
}

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Serialized JSON size of `value`, or its shallow in-memory size if it
/// cannot be serialized.
pub fn estimate_value_bytes<V: Serialize>(value: &V) -> u64 {
    let mut counter = ByteCounter::default();
    match serde_json::to_writer(&mut counter, value) {
        Ok(()) => counter.bytes,
        Err(err) => {
            trace!("Memory estimate fell back to shallow size: {}", err);
            size_of::<V>() as u64
        }
    }
}

/// Approximate bytes held for one stored entry, key included.
pub fn estimate_entry_bytes<V: Serialize>(key: &str, entry: &CacheEntry<V>) -> u64 {
    key.len() as u64
        + entry.resource_type.len() as u64
        + estimate_value_bytes(&entry.value)
        + size_of::<CacheEntry<V>>() as u64
}

/// Renders a byte count as `B`, `KB` or `MB`.
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let value = bytes as f64;
    if value < KB {
        format!("{} B", bytes)
    } else if value < MB {
        format!("{:.2} KB", value / KB)
    } else {
        format!("{:.2} MB", value / MB)
    }
}
