//! Parsing helpers for `/proc/meminfo`.

use super::split_field;

/// Total and free memory, in KiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemSummary {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemSummary {
    pub fn total_mb(&self) -> u64 {
        self.total_kb / 1024
    }

    pub fn free_mb(&self) -> u64 {
        self.free_kb / 1024
    }
}

fn field_kb(content: &str, key: &str) -> Option<u64> {
    content.lines().find_map(|line| match split_field(line) {
        Some((k, value)) if k == key => value
            .split_whitespace()
            .next()
            .and_then(|num| num.parse().ok()),
        _ => None,
    })
}

/// Extracts the first `MemTotal` and `MemFree` values.
///
/// Returns `None` unless both are present and numeric.
pub fn parse_mem_summary(content: &str) -> Option<MemSummary> {
    Some(MemSummary {
        total_kb: field_kb(content, "MemTotal")?,
        free_kb: field_kb(content, "MemFree")?,
    })
}
