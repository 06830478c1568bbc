//! Host information (read-only).
//!
//! This is "world-touching" (utsname, `/proc`) and belongs in the HAL.

use crate::HalResult;
use std::sync::Arc;

/// Synchronous snapshot queries for every source the report is built from.
///
/// Each call is independent; a failure in one source says nothing about the
/// others.
pub trait HostInfoOps {
    /// Network node name. `Ok(None)` when the host has none configured.
    fn hostname(&self) -> HalResult<Option<String>>;

    /// Operating system release string (`uname -r`).
    fn kernel_release(&self) -> HalResult<Option<String>>;

    /// Raw `/proc/cpuinfo` text.
    fn proc_cpuinfo(&self) -> HalResult<String>;

    /// Raw `/proc/meminfo` text.
    fn proc_meminfo(&self) -> HalResult<String>;

    /// Raw `/proc/uptime` text.
    fn proc_uptime(&self) -> HalResult<String>;

    /// Number of live processes known to the host.
    fn process_count(&self) -> HalResult<usize>;
}

impl<T: HostInfoOps + ?Sized> HostInfoOps for &T {
    fn hostname(&self) -> HalResult<Option<String>> {
        (**self).hostname()
    }

    fn kernel_release(&self) -> HalResult<Option<String>> {
        (**self).kernel_release()
    }

    fn proc_cpuinfo(&self) -> HalResult<String> {
        (**self).proc_cpuinfo()
    }

    fn proc_meminfo(&self) -> HalResult<String> {
        (**self).proc_meminfo()
    }

    fn proc_uptime(&self) -> HalResult<String> {
        (**self).proc_uptime()
    }

    fn process_count(&self) -> HalResult<usize> {
        (**self).process_count()
    }
}

impl<T: HostInfoOps + ?Sized> HostInfoOps for Arc<T> {
    fn hostname(&self) -> HalResult<Option<String>> {
        (**self).hostname()
    }

    fn kernel_release(&self) -> HalResult<Option<String>> {
        (**self).kernel_release()
    }

    fn proc_cpuinfo(&self) -> HalResult<String> {
        (**self).proc_cpuinfo()
    }

    fn proc_meminfo(&self) -> HalResult<String> {
        (**self).proc_meminfo()
    }

    fn proc_uptime(&self) -> HalResult<String> {
        (**self).proc_uptime()
    }

    fn process_count(&self) -> HalResult<usize> {
        (**self).process_count()
    }
}
