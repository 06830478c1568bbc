//! Linux HAL implementation reading utsname and procfs.

use super::HostInfoOps;
use crate::{HalError, HalResult};
use nix::sys::utsname::{uname, UtsName};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::PathBuf;

const DEFAULT_PROC_ROOT: &str = "/proc";

/// Real HAL implementation for Linux systems.
///
/// All procfs reads are relative to `proc_root`, which is `/proc` unless a
/// different root is supplied (tests point it at a temp directory).
#[derive(Debug, Clone)]
pub struct LinuxHal {
    proc_root: PathBuf,
}

impl Default for LinuxHal {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxHal {
    pub fn new() -> Self {
        Self::with_proc_root(DEFAULT_PROC_ROOT)
    }

    pub fn with_proc_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    fn read_proc(&self, rel: &str) -> HalResult<String> {
        let path = self.proc_root.join(rel);
        fs::read_to_string(&path).map_err(|err| {
            log::debug!("failed to read {}: {}", path.display(), err);
            HalError::Io(err)
        })
    }

    /// Reads a `sys/kernel/*` entry, falling back to utsname when procfs does
    /// not carry it.
    fn kernel_field(
        &self,
        rel: &str,
        from_uts: fn(&UtsName) -> &OsStr,
    ) -> HalResult<Option<String>> {
        match self.read_proc(rel) {
            Ok(value) => Ok(non_empty(value.trim())),
            Err(HalError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                let uts = uname()?;
                Ok(non_empty(&from_uts(&uts).to_string_lossy()))
            }
            Err(err) => Err(err),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn is_pid_dir(entry: &fs::DirEntry) -> bool {
    let name = entry.file_name();
    let name = name.to_string_lossy();
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_digit())
        && entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
}

impl HostInfoOps for LinuxHal {
    fn hostname(&self) -> HalResult<Option<String>> {
        self.kernel_field("sys/kernel/hostname", UtsName::nodename)
    }

    fn kernel_release(&self) -> HalResult<Option<String>> {
        self.kernel_field("sys/kernel/osrelease", UtsName::release)
    }

    fn proc_cpuinfo(&self) -> HalResult<String> {
        self.read_proc("cpuinfo")
    }

    fn proc_meminfo(&self) -> HalResult<String> {
        self.read_proc("meminfo")
    }

    fn proc_uptime(&self) -> HalResult<String> {
        self.read_proc("uptime")
    }

    fn process_count(&self) -> HalResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.proc_root)? {
            // Processes can exit mid-scan; a vanished entry is not an error.
            let Ok(entry) = entry else { continue };
            if is_pid_dir(&entry) {
                count += 1;
            }
        }
        Ok(count)
    }
}
