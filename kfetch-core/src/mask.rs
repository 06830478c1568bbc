//! Metric selection mask.
//!
//! Bit values match the kfetch device protocol: the caller
//! writes a native-endian `int` whose bits pick the lines to show.

use kfetch_error::{KfetchError, KfetchResult};
use std::fmt;
use std::ops::BitOr;

pub const KFETCH_RELEASE: u32 = 1 << 0;
pub const KFETCH_CPU_MODEL: u32 = 1 << 1;
pub const KFETCH_NUM_CPUS: u32 = 1 << 2;
pub const KFETCH_MEM: u32 = 1 << 3;
pub const KFETCH_NUM_PROCS: u32 = 1 << 4;
pub const KFETCH_UPTIME: u32 = 1 << 5;
pub const KFETCH_FULL: u32 = (1 << 6) - 1;

/// Size of the mask payload a write must carry.
pub const MASK_PAYLOAD_LEN: usize = std::mem::size_of::<i32>();

/// One independently selectable line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    KernelRelease,
    CpuModel,
    CpuCount,
    Memory,
    ProcessCount,
    Uptime,
}

impl Metric {
    /// Canonical emission order.
    pub const ALL: [Metric; 6] = [
        Metric::KernelRelease,
        Metric::CpuModel,
        Metric::CpuCount,
        Metric::Memory,
        Metric::ProcessCount,
        Metric::Uptime,
    ];

    pub const fn bit(self) -> u32 {
        match self {
            Metric::KernelRelease => KFETCH_RELEASE,
            Metric::CpuModel => KFETCH_CPU_MODEL,
            Metric::CpuCount => KFETCH_NUM_CPUS,
            Metric::Memory => KFETCH_MEM,
            Metric::ProcessCount => KFETCH_NUM_PROCS,
            Metric::Uptime => KFETCH_UPTIME,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Metric::KernelRelease => "kernel release",
            Metric::CpuModel => "cpu model",
            Metric::CpuCount => "cpu count",
            Metric::Memory => "memory",
            Metric::ProcessCount => "process count",
            Metric::Uptime => "uptime",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of selected metrics. Unknown bits are dropped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricMask(u32);

impl MetricMask {
    pub const EMPTY: MetricMask = MetricMask(0);
    pub const ALL: MetricMask = MetricMask(KFETCH_FULL);

    pub const fn from_bits(bits: u32) -> Self {
        MetricMask(bits & KFETCH_FULL)
    }

    /// Decodes the mask from the leading `int` of a write payload.
    pub fn from_payload(payload: &[u8]) -> KfetchResult<Self> {
        let raw: [u8; MASK_PAYLOAD_LEN] = payload
            .get(..MASK_PAYLOAD_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or_else(|| {
                KfetchError::CopyFault(format!(
                    "mask payload is {} bytes, need {}",
                    payload.len(),
                    MASK_PAYLOAD_LEN
                ))
            })?;
        Ok(Self::from_bits(i32::from_ne_bytes(raw) as u32))
    }

    /// Encodes the mask the way a caller hands it to `write`.
    pub fn to_payload(self) -> [u8; MASK_PAYLOAD_LEN] {
        (self.0 as i32).to_ne_bytes()
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, metric: Metric) -> bool {
        self.0 & metric.bit() != 0
    }

    pub const fn with(self, metric: Metric) -> Self {
        MetricMask(self.0 | metric.bit())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Selected metrics in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Metric> {
        Metric::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl From<Metric> for MetricMask {
    fn from(metric: Metric) -> Self {
        MetricMask(metric.bit())
    }
}

impl BitOr<Metric> for MetricMask {
    type Output = MetricMask;

    fn bitor(self, rhs: Metric) -> MetricMask {
        self.with(rhs)
    }
}

impl BitOr for MetricMask {
    type Output = MetricMask;

    fn bitor(self, rhs: MetricMask) -> MetricMask {
        MetricMask(self.0 | rhs.0)
    }
}

impl FromIterator<Metric> for MetricMask {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        iter.into_iter().fold(MetricMask::EMPTY, MetricMask::with)
    }
}
