use std::io;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type KfetchResult<T> = Result<T, KfetchError>;

/// Failures raised by a host metrics source.
#[derive(Error, Debug)]
pub enum HalError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("nix errno: {0}")]
    Nix(#[from] nix::errno::Errno),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum KfetchError {
    #[error("Device or resource busy")]
    Busy,

    #[error("Failed to copy data across the channel boundary: {0}")]
    CopyFault(String),

    #[error("Metrics source {source_name} unavailable: {reason}")]
    ProviderUnavailable {
        source_name: &'static str,
        reason: String,
    },

    #[error("Report of {len} bytes exceeds buffer capacity of {capacity} bytes")]
    CapacityExceeded { len: usize, capacity: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl KfetchError {
    pub fn provider(source_name: &'static str, err: impl std::fmt::Display) -> Self {
        KfetchError::ProviderUnavailable {
            source_name,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hal_error_text_is_carried_by_provider_error() {
        let err = KfetchError::provider("/proc/cpuinfo", HalError::Parse("bad field".to_string()));
        assert_eq!(
            err.to_string(),
            "Metrics source /proc/cpuinfo unavailable: Parse error: bad field"
        );
    }

    #[test]
    fn provider_error_names_source() {
        let err = KfetchError::provider("/proc/uptime", "missing");
        assert_eq!(
            err.to_string(),
            "Metrics source /proc/uptime unavailable: missing"
        );
    }
}
