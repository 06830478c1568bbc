//! kfetch channel core.
//!
//! A [`Device`] admits one [`Session`] at a time. Writing a metric mask to the
//! session composes a fresh report from the host; reads then stream it out
//! through whatever buffer the caller supplies.

pub mod banner;
pub mod config;
pub mod device;
pub mod mask;
pub mod metrics;
pub mod report;

pub use config::DeviceConfig;
pub use device::{AccessState, Device, Session};
pub use kfetch_error::{KfetchError, KfetchResult};
pub use mask::{Metric, MetricMask};
pub use report::{OverflowPolicy, ReadOutcome, ReportBuffer};
