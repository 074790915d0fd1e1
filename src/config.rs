//! rxmon configuration (htoprc-style key=value format)
//!
//! Loaded from `<config dir>/rxmon/rxmonrc`, e.g. `~/.config/rxmon/rxmonrc`
//! on Linux. Command-line flags override whatever the file sets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ConfigError;

pub const DEFAULT_DURATION_SECS: f64 = 20.0;
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;
pub const DEFAULT_OUTPUT_PREFIX: &str = "rx460_monitor";

/// Get the config file path: <config dir>/rxmon/rxmonrc
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rxmon").join("rxmonrc"))
}

/// Validated timing of one monitoring run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    /// Total run length
    pub duration: Duration,
    /// Target tick period
    pub interval: Duration,
}

impl SamplingConfig {
    pub fn new(duration_secs: f64, interval_secs: f64) -> Result<Self, ConfigError> {
        // Rejects NaN, infinities, negatives and values too large for a Duration
        let duration = Duration::try_from_secs_f64(duration_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or(ConfigError::InvalidDuration(duration_secs))?;
        let interval = Duration::try_from_secs_f64(interval_secs)
            .ok()
            .filter(|i| !i.is_zero())
            .ok_or(ConfigError::InvalidInterval(interval_secs))?;
        if interval > duration {
            return Err(ConfigError::IntervalExceedsDuration {
                interval: interval_secs,
                duration: duration_secs,
            });
        }

        Ok(Self { duration, interval })
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs_f64(DEFAULT_DURATION_SECS),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
        }
    }
}

/// Persistable settings
#[derive(Debug, Clone, PartialEq)]
pub struct RxmonConfig {
    pub duration_secs: f64,
    pub interval_secs: f64,
    pub output_prefix: String,
    /// Where CSV captures go; current directory when unset
    pub output_dir: Option<PathBuf>,
    /// Refuse to run without a GPU instead of falling back to CPU-only
    pub require_gpu: bool,
}

impl Default for RxmonConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            interval_secs: DEFAULT_INTERVAL_SECS,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            output_dir: None,
            require_gpu: false,
        }
    }
}

impl RxmonConfig {
    /// Load config from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, quietly falling back to defaults when it can't be read
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_default()
    }

    /// Load a file the user named explicitly; unreadable means a warning, then defaults
    pub fn load_explicit(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
            Self::default()
        })
    }

    pub fn try_load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            match key {
                "duration_secs" => match value.parse::<f64>() {
                    Ok(v) => cfg.duration_secs = v,
                    Err(_) => warn!(key, value, "ignoring unparsable config value"),
                },
                "interval_secs" => match value.parse::<f64>() {
                    Ok(v) => cfg.interval_secs = v,
                    Err(_) => warn!(key, value, "ignoring unparsable config value"),
                },
                "output_prefix" if !value.is_empty() => cfg.output_prefix = value.to_string(),
                "output_dir" if !value.is_empty() => cfg.output_dir = Some(PathBuf::from(value)),
                "require_gpu" => cfg.require_gpu = value == "1",
                _ => {} // Ignore unknown keys
            }
        }

        cfg
    }

    pub fn sampling(&self) -> Result<SamplingConfig, ConfigError> {
        SamplingConfig::new(self.duration_secs, self.interval_secs)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}
