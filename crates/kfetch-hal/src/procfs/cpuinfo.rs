//! Parsing helpers for `/proc/cpuinfo`.

use super::split_field;

/// Logical CPU units, and how many of them report a `core id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounts {
    pub active: usize,
    pub total: usize,
}

/// Returns the value of the first `model name` field.
///
/// Leading blanks after the colon are dropped; the rest of the line is kept
/// verbatim. An empty value is still `Some("")`.
pub fn parse_model_name(content: &str) -> Option<&str> {
    content.lines().find_map(|line| match split_field(line) {
        Some(("model name", value)) => Some(value.trim_start_matches([' ', '\t'])),
        _ => None,
    })
}

/// Counts `processor` blocks, and the blocks that carry a `core id` field.
pub fn parse_cpu_counts(content: &str) -> CpuCounts {
    let mut counts = CpuCounts::default();
    let mut in_unit = false;
    let mut unit_has_core = false;

    for line in content.lines() {
        if line.starts_with("processor") {
            if unit_has_core {
                counts.active += 1;
            }
            counts.total += 1;
            in_unit = true;
            unit_has_core = false;
        } else if in_unit && matches!(split_field(line), Some(("core id", _))) {
            unit_has_core = true;
        }
    }
    if unit_has_core {
        counts.active += 1;
    }
    counts
}
