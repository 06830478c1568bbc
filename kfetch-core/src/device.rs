//! Channel access controller.
//!
//! A [`Device`] can be held by at most one [`Session`]. Opening flips the
//! access state from Free to Held with a single compare-and-swap, so two
//! racing openers can never both win; the loser gets `Busy` immediately.
//! Dropping (or closing) the session flips it back.

use crate::banner;
use crate::config::DeviceConfig;
use crate::mask::MetricMask;
use crate::report::{ReadOutcome, ReportBuffer};
use kfetch_error::{KfetchError, KfetchResult};
use kfetch_hal::HostInfoOps;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AccessState {
    Free = 0,
    Held = 1,
}

impl AccessState {
    fn from_u8(raw: u8) -> Self {
        if raw == AccessState::Held as u8 {
            AccessState::Held
        } else {
            AccessState::Free
        }
    }
}

/// The host-information channel.
///
/// Owns the metrics backend, the report buffer, and the access flag. The
/// buffer is only touched through a [`Session`], which is what keeps writes
/// and reads from different callers apart.
pub struct Device<H> {
    hal: H,
    config: DeviceConfig,
    state: AtomicU8,
    liveness: AtomicUsize,
    buffer: Mutex<ReportBuffer>,
}

impl<H: HostInfoOps> Device<H> {
    pub fn new(hal: H, config: DeviceConfig) -> Self {
        log::info!("Device created on /dev/{}", config.device_name);
        Self {
            hal,
            buffer: Mutex::new(ReportBuffer::new(config.capacity)),
            config,
            state: AtomicU8::new(AccessState::Free as u8),
            liveness: AtomicUsize::new(0),
        }
    }

    /// Claims exclusive access, or fails with `Busy` without waiting.
    pub fn open(&self) -> KfetchResult<Session<'_, H>> {
        if self
            .state
            .compare_exchange(
                AccessState::Free as u8,
                AccessState::Held as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            log::info!("/dev/{} is busy", self.config.device_name);
            return Err(KfetchError::Busy);
        }
        self.liveness.fetch_add(1, Ordering::AcqRel);
        log::debug!("/dev/{} opened", self.config.device_name);
        Ok(Session { device: self })
    }

    pub fn state(&self) -> AccessState {
        AccessState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_held(&self) -> bool {
        self.state() == AccessState::Held
    }

    /// Outstanding references that pin the device in place.
    pub fn liveness(&self) -> usize {
        self.liveness.load(Ordering::Acquire)
    }

    pub fn can_unload(&self) -> bool {
        self.liveness() == 0
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    fn release(&self) {
        self.state.store(AccessState::Free as u8, Ordering::Release);
        let released = self
            .liveness
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        debug_assert!(released.is_ok(), "release without a matching open");
        log::debug!("/dev/{} released", self.config.device_name);
    }

    fn buffer(&self) -> MutexGuard<'_, ReportBuffer> {
        match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Exclusive handle on a [`Device`]; releases it on drop.
pub struct Session<'a, H: HostInfoOps> {
    device: &'a Device<H>,
}

impl<'a, H: HostInfoOps> Session<'a, H> {
    /// Decodes a mask from `payload` and composes a fresh report.
    ///
    /// Returns the full payload length, as the whole write is consumed.
    pub fn write(&self, payload: &[u8]) -> KfetchResult<usize> {
        let mask = MetricMask::from_payload(payload).map_err(|err| {
            log::error!("Failed to copy data from user: {}", err);
            err
        })?;
        self.write_mask(mask)?;
        Ok(payload.len())
    }

    /// Composes the report for `mask` into the buffer.
    ///
    /// Returns the number of report bytes stored.
    pub fn write_mask(&self, mask: MetricMask) -> KfetchResult<usize> {
        let report = banner::render(&self.device.hal, mask);
        let mut buffer = self.device.buffer();
        buffer.store(&report, self.device.config.overflow)
    }

    /// Streams the next chunk of the stored report into `dst`.
    pub fn read(&self, dst: &mut [u8]) -> KfetchResult<ReadOutcome> {
        self.device.buffer().read_into(dst).map_err(|err| {
            log::error!("Failed to copy data to user: {}", err);
            err
        })
    }

    /// Reads until end-of-stream using `chunk`-sized calls.
    pub fn read_to_end(&self, chunk: usize) -> KfetchResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut dst = vec![0u8; chunk];
        loop {
            match self.read(&mut dst)? {
                ReadOutcome::Data(n) => out.extend_from_slice(&dst[..n]),
                ReadOutcome::End => return Ok(out),
            }
        }
    }

    /// Releases exclusive access.
    pub fn close(self) {}
}

impl<H: HostInfoOps> Drop for Session<'_, H> {
    fn drop(&mut self) {
        self.device.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banner::BANNER;
    use crate::mask::Metric;
    use kfetch_hal::FakeHal;

    fn device() -> Device<FakeHal> {
        Device::new(FakeHal::sample(), DeviceConfig::default())
    }

    #[test]
    fn second_open_is_busy() {
        let dev = device();
        let session = dev.open().unwrap();
        assert!(matches!(dev.open(), Err(KfetchError::Busy)));
        assert_eq!(dev.state(), AccessState::Held);
        drop(session);
        assert!(dev.open().is_ok());
    }

    #[test]
    fn close_frees_and_drops_liveness() {
        let dev = device();
        assert!(dev.can_unload());
        let session = dev.open().unwrap();
        assert_eq!(dev.liveness(), 1);
        assert!(!dev.can_unload());
        session.close();
        assert_eq!(dev.state(), AccessState::Free);
        assert_eq!(dev.liveness(), 0);
    }

    #[test]
    fn write_then_drain() {
        let dev = device();
        let session = dev.open().unwrap();
        let payload = MetricMask::from(Metric::Uptime).to_payload();
        assert_eq!(session.write(&payload).unwrap(), payload.len());

        let text = String::from_utf8(session.read_to_end(16).unwrap()).unwrap();
        assert!(text.contains("testbox"));
        assert!(text.contains(&format!("{}\x1b[33mUptime:", BANNER[0])));

        let mut dst = [0u8; 16];
        assert_eq!(session.read(&mut dst).unwrap(), ReadOutcome::End);
    }

    #[test]
    fn short_payload_is_copy_fault() {
        let dev = device();
        let session = dev.open().unwrap();
        let err = session.write(&[0x01]).unwrap_err();
        assert!(matches!(err, KfetchError::CopyFault(_)));
        // The session survives a failed write.
        assert!(dev.is_held());
        assert_eq!(session.read(&mut [0u8; 8]).unwrap(), ReadOutcome::End);
    }

    #[test]
    fn unvalidated_huge_capacity_does_not_allocate_up_front() {
        let config = DeviceConfig {
            capacity: usize::MAX,
            ..DeviceConfig::default()
        };
        let dev = Device::new(FakeHal::sample(), config);
        let session = dev.open().unwrap();
        assert!(session.write_mask(MetricMask::ALL).unwrap() > 0);
        assert!(!session.read_to_end(64).unwrap().is_empty());
    }

    #[test]
    fn read_before_write_is_end() {
        let dev = device();
        let session = dev.open().unwrap();
        assert_eq!(session.read(&mut [0u8; 8]).unwrap(), ReadOutcome::End);
    }
}
