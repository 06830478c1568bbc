//! CLI argument parsing for kfetch
//!
//! With no metric flags every line is shown.

use clap::Parser;
use kfetch_core::{Metric, MetricMask};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kfetch")]
#[command(about = "Fetch host information through the kfetch channel")]
pub struct Cli {
    /// Show all information
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Show the kernel release
    #[arg(short = 'r', long)]
    pub release: bool,

    /// Show the CPU model name
    #[arg(short = 'c', long)]
    pub cpu_model: bool,

    /// Show the number of CPUs (active / total)
    #[arg(short = 'n', long)]
    pub num_cpus: bool,

    /// Show free / total memory
    #[arg(short = 'm', long)]
    pub mem: bool,

    /// Show the number of processes
    #[arg(short = 'p', long)]
    pub num_procs: bool,

    /// Show the uptime in minutes
    #[arg(short = 'u', long)]
    pub uptime: bool,

    /// Raw metric mask (1=release 2=cpu 4=cpus 8=mem 16=procs 32=uptime)
    #[arg(long, value_name = "BITS")]
    pub mask: Option<u32>,

    /// TOML device configuration (defaults to $KFETCH_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// procfs root to read host data from
    #[arg(long)]
    pub proc_root: Option<PathBuf>,

    /// Report buffer capacity in bytes
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Read buffer size used to drain the report
    #[arg(long, default_value_t = 256)]
    pub chunk: usize,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn metric_mask(&self) -> MetricMask {
        if self.all {
            return MetricMask::ALL;
        }
        let flags = [
            (self.release, Metric::KernelRelease),
            (self.cpu_model, Metric::CpuModel),
            (self.num_cpus, Metric::CpuCount),
            (self.mem, Metric::Memory),
            (self.num_procs, Metric::ProcessCount),
            (self.uptime, Metric::Uptime),
        ];
        let selected: MetricMask = flags
            .into_iter()
            .filter_map(|(on, metric)| on.then_some(metric))
            .collect();

        match self.mask {
            Some(bits) => selected | MetricMask::from_bits(bits),
            None if selected.is_empty() => MetricMask::ALL,
            None => selected,
        }
    }
}
