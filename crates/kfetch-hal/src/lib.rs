//! kfetch host metrics provider.
//!
//! Everything that touches the running system (utsname, `/proc`) lives behind
//! [`HostInfoOps`] so the channel core can be driven by [`FakeHal`] in tests.

pub mod error;
pub mod hal;
pub mod procfs;

pub use error::{HalError, HalResult};
pub use hal::{FakeHal, HostInfoOps, LinuxHal, Operation};
