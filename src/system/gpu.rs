//! Best-effort GPU metrics behind a capability boundary.
//!
//! Three independent readings (utilization, temperature, power) are taken
//! from whatever device the startup probe found. Each reading degrades on its
//! own when the device does not expose it; an unexpected failure degrades the
//! whole call. Nothing here ever returns an error to the sampling loop.

use tracing::{debug, warn};

use crate::error::GpuError;

// ─── Types ───────────────────────────────────────────────────────────────────

/// Outcome of one GPU sub-reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    /// The device does not expose this metric
    Unsupported,
    /// No device, or the whole read failed this tick
    AdapterUnavailable,
}

impl Reading {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unsupported | Self::AdapterUnavailable => None,
        }
    }

    fn from_result(result: Result<f64, GpuError>) -> Result<Self, GpuError> {
        match result {
            Ok(v) => Ok(Self::Value(v)),
            Err(e) if e.is_unsupported() => Ok(Self::Unsupported),
            Err(e) => Err(e),
        }
    }
}

/// One tick's worth of GPU readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuReadings {
    pub utilization: Reading,
    pub temperature: Reading,
    pub power: Reading,
}

impl GpuReadings {
    pub fn unavailable() -> Self {
        Self {
            utilization: Reading::AdapterUnavailable,
            temperature: Reading::AdapterUnavailable,
            power: Reading::AdapterUnavailable,
        }
    }
}

/// A vendor device able to report some subset of the metrics.
///
/// Implementations return `GpuError::Unsupported` for a metric the hardware
/// does not expose. Any other error is treated as a failed read.
pub trait GpuDevice {
    fn name(&self) -> &str;

    /// Utilization in percent
    fn utilization(&mut self) -> Result<f64, GpuError>;

    /// Temperature in degrees Celsius
    fn temperature(&mut self) -> Result<f64, GpuError>;

    /// Board power in watts
    fn power_watts(&mut self) -> Result<f64, GpuError>;

    /// Board power in milliwatts, for devices without a direct watts reading
    fn power_milliwatts(&mut self) -> Result<f64, GpuError> {
        Err(GpuError::Unsupported("power (mW)"))
    }
}

/// Result of the one-time startup probe
pub enum GpuCapability {
    Detected(Box<dyn GpuDevice>),
    Missing { reason: String },
}

impl GpuCapability {
    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Detected(_))
    }

    pub fn device_name(&self) -> Option<&str> {
        match self {
            Self::Detected(device) => Some(device.name()),
            Self::Missing { .. } => None,
        }
    }
}

impl std::fmt::Debug for GpuCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detected(device) => f.debug_tuple("Detected").field(&device.name()).finish(),
            Self::Missing { reason } => f.debug_struct("Missing").field("reason", reason).finish(),
        }
    }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

pub struct GpuAdapter {
    capability: GpuCapability,
    failed_reads: usize,
}

impl GpuAdapter {
    pub fn new(capability: GpuCapability) -> Self {
        Self {
            capability,
            failed_reads: 0,
        }
    }

    pub fn capability(&self) -> &GpuCapability {
        &self.capability
    }

    /// Number of reads that failed unexpectedly and were degraded
    pub fn failed_reads(&self) -> usize {
        self.failed_reads
    }

    /// Read all three metrics. Never fails; see `Reading` for the degraded cases.
    pub fn read_metrics(&mut self) -> GpuReadings {
        let device = match &mut self.capability {
            GpuCapability::Detected(device) => device,
            GpuCapability::Missing { reason } => {
                debug!(%reason, "GPU capability missing, skipping read");
                return GpuReadings::unavailable();
            }
        };

        match read_device(device.as_mut()) {
            Ok(readings) => readings,
            Err(e) => {
                self.failed_reads += 1;
                warn!(error = %e, errno = ?e.os_error(), "GPU read failed");
                GpuReadings::unavailable()
            }
        }
    }
}

fn read_device(device: &mut dyn GpuDevice) -> Result<GpuReadings, GpuError> {
    let utilization = Reading::from_result(device.utilization())?;
    let temperature = Reading::from_result(device.temperature())?;
    let power = match device.power_watts() {
        Ok(watts) => Reading::Value(watts),
        Err(e) if e.is_unsupported() => {
            Reading::from_result(device.power_milliwatts().map(milliwatts_to_watts))?
        }
        Err(e) => return Err(e),
    };

    Ok(GpuReadings {
        utilization,
        temperature,
        power,
    })
}

pub fn milliwatts_to_watts(mw: f64) -> f64 {
    mw / 1000.0
}
