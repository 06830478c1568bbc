//! Fake HAL implementation for testing.
//!
//! Serves fixture text instead of touching the host and records every query,
//! allowing deterministic tests of report composition on any machine.

use super::HostInfoOps;
use crate::{HalError, HalResult};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Query records for testing and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Hostname,
    KernelRelease,
    CpuInfo,
    MemInfo,
    Uptime,
    ProcessCount,
}

/// Shared state for FakeHal queries.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All queries that were served (or refused)
    operations: Vec<Operation>,
    /// Queries that fail with `HalError::Unavailable`
    failing: HashSet<Operation>,
    hostname: Option<String>,
    kernel_release: Option<String>,
    cpuinfo: String,
    meminfo: String,
    uptime: String,
    process_count: usize,
}

/// Fake HAL implementation that answers from fixtures.
///
/// Clones share state, so a test can keep a handle for inspection after
/// moving one into a device.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    /// An empty host: no hostname, empty sources, zero processes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A plausible single-socket, two-thread host.
    pub fn sample() -> Self {
        Self::new()
            .with_hostname("testbox")
            .with_kernel_release("6.1.0-test")
            .with_cpuinfo(SAMPLE_CPUINFO)
            .with_meminfo(SAMPLE_MEMINFO)
            .with_uptime("7260.42 14000.10\n")
            .with_process_count(128)
    }

    pub fn with_hostname(self, hostname: &str) -> Self {
        self.state().hostname = Some(hostname.to_string());
        self
    }

    pub fn with_kernel_release(self, release: &str) -> Self {
        self.state().kernel_release = Some(release.to_string());
        self
    }

    pub fn with_cpuinfo(self, cpuinfo: &str) -> Self {
        self.state().cpuinfo = cpuinfo.to_string();
        self
    }

    pub fn with_meminfo(self, meminfo: &str) -> Self {
        self.state().meminfo = meminfo.to_string();
        self
    }

    pub fn with_uptime(self, uptime: &str) -> Self {
        self.state().uptime = uptime.to_string();
        self
    }

    pub fn with_process_count(self, count: usize) -> Self {
        self.state().process_count = count;
        self
    }

    /// Make every subsequent `op` query fail.
    pub fn fail(&self, op: Operation) {
        self.state().failing.insert(op);
    }

    /// Get all recorded queries.
    pub fn operations(&self) -> Vec<Operation> {
        self.state().operations.clone()
    }

    /// Get the number of queries recorded.
    pub fn operation_count(&self) -> usize {
        self.state().operations.len()
    }

    /// Check if a specific query was recorded.
    pub fn has_operation(&self, op: Operation) -> bool {
        self.state().operations.contains(&op)
    }

    /// Clear all recorded queries.
    pub fn clear(&self) {
        self.state().operations.clear();
    }

    fn state(&self) -> MutexGuard<'_, FakeHalState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn serve<T>(&self, op: Operation, read: impl FnOnce(&FakeHalState) -> T) -> HalResult<T> {
        let mut state = self.state();
        state.operations.push(op);
        if state.failing.contains(&op) {
            log::info!("FAKE HAL: {:?} unavailable", op);
            return Err(HalError::Unavailable(format!("{:?}", op)));
        }
        Ok(read(&*state))
    }
}

impl HostInfoOps for FakeHal {
    fn hostname(&self) -> HalResult<Option<String>> {
        self.serve(Operation::Hostname, |s| s.hostname.clone())
    }

    fn kernel_release(&self) -> HalResult<Option<String>> {
        self.serve(Operation::KernelRelease, |s| s.kernel_release.clone())
    }

    fn proc_cpuinfo(&self) -> HalResult<String> {
        self.serve(Operation::CpuInfo, |s| s.cpuinfo.clone())
    }

    fn proc_meminfo(&self) -> HalResult<String> {
        self.serve(Operation::MemInfo, |s| s.meminfo.clone())
    }

    fn proc_uptime(&self) -> HalResult<String> {
        self.serve(Operation::Uptime, |s| s.uptime.clone())
    }

    fn process_count(&self) -> HalResult<usize> {
        self.serve(Operation::ProcessCount, |s| s.process_count)
    }
}

const SAMPLE_CPUINFO: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
core id\t\t: 0

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
core id\t\t: 1
";

const SAMPLE_MEMINFO: &str = "\
MemTotal:        8048640 kB
MemFree:         2097152 kB
MemAvailable:    5000000 kB
";
