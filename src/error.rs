use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single GPU sub-reading.
///
/// `Unsupported` is the expected "this device does not expose that metric"
/// case; every other variant is an unexpected failure that the adapter
/// absorbs for the whole tick.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("{0} not supported by this device")]
    Unsupported(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected value {value:?} in {path}")]
    Parse { path: PathBuf, value: String },
}

impl GpuError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Raw OS error code behind an I/O failure, if any
    pub fn os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            Self::Unsupported(_) | Self::Parse { .. } => None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("duration must be a positive number of seconds (got {0})")]
    InvalidDuration(f64),

    #[error("interval must be a positive number of seconds (got {0})")]
    InvalidInterval(f64),

    #[error("interval ({interval}s) must not exceed duration ({duration}s)")]
    IntervalExceedsDuration { interval: f64, duration: f64 },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
