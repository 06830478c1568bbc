//! Metrics provider: one colored report line per metric.
//!
//! Every lookup is isolated. A source that cannot be read is logged and
//! degrades to a missing line (or, for the process count, an explicit failure
//! line); it never aborts the rest of the report.

use crate::mask::Metric;
use kfetch_error::{KfetchError, KfetchResult};
use kfetch_hal::procfs::{parse_cpu_counts, parse_mem_summary, parse_model_name, parse_uptime_secs};
use kfetch_hal::HostInfoOps;
use std::fmt::Display;

pub const LABEL_COLOR: &str = "\x1b[33m";
pub const COLOR_RESET: &str = "\x1b[0m";

/// Emitted in place of a process count that could not be determined.
pub const PROCESS_FAILURE_LINE: &str = "Failed to fetch the number of process\n";

/// Shown when the node name cannot be read.
pub const UNKNOWN_HOSTNAME: &str = "unknown";

/// `<color>Label:<reset><sep><value>\n`
pub fn metric_line(label: &str, sep: &str, value: impl Display) -> String {
    format!("{LABEL_COLOR}{label}:{COLOR_RESET}{sep}{value}\n")
}

/// The colored node name followed by a dashed underline of the same length.
pub fn hostname_lines(hostname: &str) -> [String; 2] {
    [
        format!("{LABEL_COLOR}{hostname}{COLOR_RESET}\n"),
        format!("{}\n", "-".repeat(hostname.chars().count())),
    ]
}

/// Renders host snapshots from a [`HostInfoOps`] backend.
pub struct MetricsProvider<'a, H: ?Sized> {
    hal: &'a H,
}

impl<'a, H: HostInfoOps + ?Sized> MetricsProvider<'a, H> {
    pub fn new(hal: &'a H) -> Self {
        Self { hal }
    }

    /// Node name, or [`UNKNOWN_HOSTNAME`] if it cannot be read.
    pub fn hostname(&self) -> String {
        match self.hal.hostname() {
            Ok(Some(name)) => name,
            Ok(None) => {
                log::warn!("Host has no node name");
                UNKNOWN_HOSTNAME.to_string()
            }
            Err(err) => {
                log::error!("Failed to fetch the hostname: {}", err);
                UNKNOWN_HOSTNAME.to_string()
            }
        }
    }

    /// The formatted line for `metric`, or `None` if its source failed.
    pub fn line(&self, metric: Metric) -> Option<String> {
        match self.try_line(metric) {
            Ok(line) => Some(line),
            Err(err) if metric == Metric::ProcessCount => {
                log::error!("{}", err);
                Some(PROCESS_FAILURE_LINE.to_string())
            }
            Err(err) => {
                log::error!("Failed to fetch {}: {}", metric, err);
                None
            }
        }
    }

    pub fn try_line(&self, metric: Metric) -> KfetchResult<String> {
        match metric {
            Metric::KernelRelease => self.kernel_release(),
            Metric::CpuModel => self.cpu_model(),
            Metric::CpuCount => self.cpu_counts(),
            Metric::Memory => self.memory(),
            Metric::ProcessCount => self.process_count(),
            Metric::Uptime => self.uptime(),
        }
    }

    fn kernel_release(&self) -> KfetchResult<String> {
        let release = self
            .hal
            .kernel_release()
            .map_err(|e| KfetchError::provider("utsname release", e))?
            .ok_or_else(|| KfetchError::provider("utsname release", "empty release"))?;
        Ok(metric_line("Kernel", "\t", release))
    }

    fn cpu_model(&self) -> KfetchResult<String> {
        let cpuinfo = self
            .hal
            .proc_cpuinfo()
            .map_err(|e| KfetchError::provider("/proc/cpuinfo", e))?;
        Ok(metric_line(
            "CPU",
            "\t\t",
            parse_model_name(&cpuinfo).unwrap_or_default(),
        ))
    }

    fn cpu_counts(&self) -> KfetchResult<String> {
        let cpuinfo = self
            .hal
            .proc_cpuinfo()
            .map_err(|e| KfetchError::provider("/proc/cpuinfo", e))?;
        let counts = parse_cpu_counts(&cpuinfo);
        Ok(metric_line(
            "CPUs",
            "\t",
            format_args!("{} / {}", counts.active, counts.total),
        ))
    }

    fn memory(&self) -> KfetchResult<String> {
        let meminfo = self
            .hal
            .proc_meminfo()
            .map_err(|e| KfetchError::provider("/proc/meminfo", e))?;
        let mem = parse_mem_summary(&meminfo)
            .ok_or_else(|| KfetchError::provider("/proc/meminfo", "MemTotal/MemFree not found"))?;
        Ok(metric_line(
            "Mem",
            "\t\t",
            format_args!("{} MB / {} MB", mem.free_mb(), mem.total_mb()),
        ))
    }

    fn process_count(&self) -> KfetchResult<String> {
        let count = self
            .hal
            .process_count()
            .map_err(|e| KfetchError::provider("process table", e))?;
        if count == 0 {
            return Err(KfetchError::provider(
                "process table",
                "Failed to fetch the number of process",
            ));
        }
        Ok(metric_line("Procs", "\t", count))
    }

    fn uptime(&self) -> KfetchResult<String> {
        let uptime = self
            .hal
            .proc_uptime()
            .map_err(|e| KfetchError::provider("/proc/uptime", e))?;
        let secs = parse_uptime_secs(&uptime)
            .ok_or_else(|| KfetchError::provider("/proc/uptime", "no leading seconds value"))?;
        Ok(metric_line("Uptime", "\t", format_args!("{} mins", secs / 60)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfetch_hal::{FakeHal, Operation};

    #[test]
    fn lines_carry_color_markers() {
        let hal = FakeHal::sample();
        let provider = MetricsProvider::new(&hal);
        assert_eq!(
            provider.line(Metric::KernelRelease).unwrap(),
            "\x1b[33mKernel:\x1b[0m\t6.1.0-test\n"
        );
        assert_eq!(
            provider.line(Metric::Uptime).unwrap(),
            "\x1b[33mUptime:\x1b[0m\t121 mins\n"
        );
        assert_eq!(
            provider.line(Metric::Memory).unwrap(),
            "\x1b[33mMem:\x1b[0m\t\t2048 MB / 7860 MB\n"
        );
    }

    #[test]
    fn cpu_lines_share_the_cpuinfo_source() {
        let hal = FakeHal::new().with_cpuinfo(
            "processor : 0\nmodel name : Toy\ncore id : 0\nprocessor : 1\nprocessor : 2\ncore id : 1\nprocessor : 3\n",
        );
        let provider = MetricsProvider::new(&hal);
        assert_eq!(
            provider.line(Metric::CpuModel).unwrap(),
            "\x1b[33mCPU:\x1b[0m\t\tToy\n"
        );
        assert_eq!(
            provider.line(Metric::CpuCount).unwrap(),
            "\x1b[33mCPUs:\x1b[0m\t2 / 4\n"
        );
        assert_eq!(hal.operations(), vec![Operation::CpuInfo, Operation::CpuInfo]);
    }

    #[test]
    fn missing_model_name_keeps_label() {
        let hal = FakeHal::new().with_cpuinfo("processor : 0\n");
        let provider = MetricsProvider::new(&hal);
        assert_eq!(
            provider.line(Metric::CpuModel).unwrap(),
            "\x1b[33mCPU:\x1b[0m\t\t\n"
        );
    }

    #[test]
    fn zero_processes_is_a_failure_line() {
        let hal = FakeHal::sample().with_process_count(0);
        let provider = MetricsProvider::new(&hal);
        assert_eq!(
            provider.line(Metric::ProcessCount).unwrap(),
            PROCESS_FAILURE_LINE
        );
    }

    #[test]
    fn process_query_error_is_a_failure_line() {
        let hal = FakeHal::sample();
        hal.fail(Operation::ProcessCount);
        let provider = MetricsProvider::new(&hal);
        assert_eq!(
            provider.line(Metric::ProcessCount).unwrap(),
            PROCESS_FAILURE_LINE
        );
    }

    #[test]
    fn unreadable_source_omits_line() {
        let hal = FakeHal::sample();
        hal.fail(Operation::MemInfo);
        let provider = MetricsProvider::new(&hal);
        assert_eq!(provider.line(Metric::Memory), None);
        assert!(matches!(
            provider.try_line(Metric::Memory),
            Err(KfetchError::ProviderUnavailable {
                source_name: "/proc/meminfo",
                ..
            })
        ));
        // Neighbouring sources are unaffected.
        assert!(provider.line(Metric::Uptime).is_some());
    }

    #[test]
    fn unparseable_meminfo_omits_line() {
        let hal = FakeHal::sample().with_meminfo("garbage\n");
        assert_eq!(MetricsProvider::new(&hal).line(Metric::Memory), None);
    }

    #[test]
    fn hostname_falls_back_to_unknown() {
        let hal = FakeHal::new();
        assert_eq!(MetricsProvider::new(&hal).hostname(), UNKNOWN_HOSTNAME);

        let hal = FakeHal::sample();
        hal.fail(Operation::Hostname);
        assert_eq!(MetricsProvider::new(&hal).hostname(), UNKNOWN_HOSTNAME);
    }

    #[test]
    fn hostname_underline_matches_length() {
        let [name, underline] = hostname_lines("pi4");
        assert_eq!(name, "\x1b[33mpi4\x1b[0m\n");
        assert_eq!(underline, "---\n");
    }
}
