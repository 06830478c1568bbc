//! Parsers for the procfs text formats the report reads.

pub mod cpuinfo;
pub mod meminfo;
pub mod uptime;

pub use cpuinfo::{parse_cpu_counts, parse_model_name, CpuCounts};
pub use meminfo::{parse_mem_summary, MemSummary};
pub use uptime::parse_uptime_secs;

/// Splits a `key : value` line, trimming the key.
fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(key, value)| (key.trim(), value))
}
