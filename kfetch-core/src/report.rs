//! Report buffer and the streaming read protocol.
//!
//! The buffer holds one composed report of at most `capacity` bytes plus a
//! read cursor. A write replaces the content and rewinds the cursor; reads
//! hand out the bytes after the cursor until none remain, after which the
//! content is cleared and the next read reports end-of-stream.

use kfetch_error::{KfetchError, KfetchResult};
use serde::{Deserialize, Serialize};

/// Appended when a report is cut to fit the buffer.
pub const TRUNCATION_MARKER: &str = "\n[truncated]\n";

/// What to do with a report larger than the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep what fits and end with [`TRUNCATION_MARKER`].
    #[default]
    Truncate,
    /// Fail the write with `CapacityExceeded` and store nothing.
    Reject,
}

/// Result of one read call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes were copied into the destination.
    Data(usize),
    /// Nothing left; the cursor has been rewound.
    End,
}

#[derive(Debug, Clone)]
pub struct ReportBuffer {
    data: Vec<u8>,
    cursor: usize,
    capacity: usize,
}

impl ReportBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            cursor: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.cursor)
    }

    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.cursor = 0;
    }

    /// Replaces the content with `report` and rewinds the cursor.
    ///
    /// Returns the number of bytes stored.
    pub fn store(&mut self, report: &str, policy: OverflowPolicy) -> KfetchResult<usize> {
        self.clear();

        if report.len() <= self.capacity {
            self.data.reserve_exact(report.len());
            self.data.extend_from_slice(report.as_bytes());
            return Ok(self.data.len());
        }

        let err = KfetchError::CapacityExceeded {
            len: report.len(),
            capacity: self.capacity,
        };
        match policy {
            OverflowPolicy::Reject => {
                log::error!("{}", err);
                Err(err)
            }
            OverflowPolicy::Truncate => {
                log::warn!("{}; truncating", err);
                self.data.reserve_exact(self.capacity);
                if self.capacity < TRUNCATION_MARKER.len() {
                    self.data
                        .extend_from_slice(floor_char_boundary(report, self.capacity).as_bytes());
                } else {
                    let keep = self.capacity - TRUNCATION_MARKER.len();
                    self.data
                        .extend_from_slice(floor_char_boundary(report, keep).as_bytes());
                    self.data.extend_from_slice(TRUNCATION_MARKER.as_bytes());
                }
                Ok(self.data.len())
            }
        }
    }

    /// Copies the next chunk into `dst`.
    ///
    /// Delivers `min(remaining, dst.len())` bytes. Once the last byte has
    /// gone out the content is dropped, so every later read returns
    /// [`ReadOutcome::End`] until the next [`store`](Self::store).
    pub fn read_into(&mut self, dst: &mut [u8]) -> KfetchResult<ReadOutcome> {
        if self.cursor >= self.data.len() {
            self.cursor = 0;
            return Ok(ReadOutcome::End);
        }
        if dst.is_empty() {
            return Err(KfetchError::CopyFault(format!(
                "destination buffer is empty, {} bytes pending",
                self.remaining()
            )));
        }

        let pending = &self.data[self.cursor..];
        let n = pending.len().min(dst.len());
        dst[..n].copy_from_slice(&pending[..n]);
        self.cursor += n;

        if self.cursor == self.data.len() {
            self.data.clear();
        }
        Ok(ReadOutcome::Data(n))
    }
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn floor_char_boundary(s: &str, max: usize) -> &str {
    if max >= s.len() {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(buf: &mut ReportBuffer, chunk: usize) -> (Vec<u8>, usize) {
        let mut out = Vec::new();
        let mut calls = 0;
        let mut dst = vec![0u8; chunk];
        loop {
            calls += 1;
            match buf.read_into(&mut dst).unwrap() {
                ReadOutcome::Data(n) => out.extend_from_slice(&dst[..n]),
                ReadOutcome::End => return (out, calls),
            }
        }
    }

    #[test]
    fn large_destination_takes_everything_then_end() {
        let mut buf = ReportBuffer::new(1024);
        buf.store("hello\nworld\n", OverflowPolicy::Truncate).unwrap();

        let mut dst = [0u8; 64];
        assert_eq!(buf.read_into(&mut dst).unwrap(), ReadOutcome::Data(12));
        assert_eq!(&dst[..12], b"hello\nworld\n");
        assert!(buf.is_empty());
        assert_eq!(buf.read_into(&mut dst).unwrap(), ReadOutcome::End);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn small_destination_streams_in_chunks() {
        let mut buf = ReportBuffer::new(1024);
        let report = "abcdefghij".repeat(10);
        buf.store(&report, OverflowPolicy::Truncate).unwrap();

        let (out, calls) = drain(&mut buf, 7);
        assert_eq!(out, report.as_bytes());
        // 15 chunks of 7 bytes (last one short), then End.
        assert_eq!(calls, 16);
    }

    #[test]
    fn end_is_sticky_until_next_store() {
        let mut buf = ReportBuffer::new(64);
        buf.store("x\n", OverflowPolicy::Truncate).unwrap();
        drain(&mut buf, 64);

        let mut dst = [0u8; 8];
        for _ in 0..3 {
            assert_eq!(buf.read_into(&mut dst).unwrap(), ReadOutcome::End);
        }

        buf.store("y\n", OverflowPolicy::Truncate).unwrap();
        assert_eq!(buf.read_into(&mut dst).unwrap(), ReadOutcome::Data(2));
    }

    #[test]
    fn store_rewinds_a_partial_read() {
        let mut buf = ReportBuffer::new(64);
        buf.store("first report\n", OverflowPolicy::Truncate).unwrap();
        let mut dst = [0u8; 4];
        buf.read_into(&mut dst).unwrap();
        assert_eq!(buf.cursor(), 4);

        buf.store("second\n", OverflowPolicy::Truncate).unwrap();
        assert_eq!(buf.cursor(), 0);
        let (out, _) = drain(&mut buf, 64);
        assert_eq!(out, b"second\n");
    }

    #[test]
    fn empty_destination_is_copy_fault_and_keeps_cursor() {
        let mut buf = ReportBuffer::new(64);
        buf.store("data\n", OverflowPolicy::Truncate).unwrap();
        let err = buf.read_into(&mut []).unwrap_err();
        assert!(matches!(err, KfetchError::CopyFault(_)));
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.remaining(), 5);
    }

    #[test]
    fn truncate_policy_appends_marker_within_capacity() {
        let mut buf = ReportBuffer::new(32);
        let stored = buf.store(&"z".repeat(100), OverflowPolicy::Truncate).unwrap();
        assert_eq!(stored, buf.capacity());
        let text = String::from_utf8(buf.contents().to_vec()).unwrap();
        assert!(text.ends_with(TRUNCATION_MARKER));
        assert_eq!(text.len(), 32);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let mut buf = ReportBuffer::new(TRUNCATION_MARKER.len() + 3);
        buf.store(&"\u{e9}".repeat(10), OverflowPolicy::Truncate)
            .unwrap();
        let text = String::from_utf8(buf.contents().to_vec()).unwrap();
        assert_eq!(text, format!("\u{e9}{TRUNCATION_MARKER}"));
    }

    #[test]
    fn reject_policy_stores_nothing() {
        let mut buf = ReportBuffer::new(8);
        buf.store("old\n", OverflowPolicy::Reject).unwrap();
        let err = buf
            .store("far too long for eight", OverflowPolicy::Reject)
            .unwrap_err();
        assert!(matches!(
            err,
            KfetchError::CapacityExceeded {
                len: 22,
                capacity: 8
            }
        ));
        assert!(buf.is_empty());
        assert_eq!(buf.read_into(&mut [0u8; 8]).unwrap(), ReadOutcome::End);
    }

    #[test]
    fn exact_fit_is_not_truncated() {
        let mut buf = ReportBuffer::new(4);
        assert_eq!(buf.store("abcd", OverflowPolicy::Reject).unwrap(), 4);
    }
}
