//! Scripted CPU and GPU sources for tests.

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::error::GpuError;
use crate::system::cpu::CpuSource;
use crate::system::gpu::GpuDevice;

/// What a fake sub-reading returns on every call
#[derive(Debug, Clone, Copy)]
pub enum Script {
    Value(f64),
    Unsupported,
}

impl Script {
    fn play(self, metric: &'static str) -> Result<f64, GpuError> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Unsupported => Err(GpuError::Unsupported(metric)),
        }
    }
}

pub struct FakeGpuDevice {
    utilization: Script,
    temperature: Script,
    power: Script,
    milliwatts: Script,
    /// 1-based read number on which the device fails unexpectedly
    fail_on: Option<usize>,
    reads: usize,
}

impl FakeGpuDevice {
    pub fn new(utilization: Script, temperature: Script, power: Script) -> Self {
        Self {
            utilization,
            temperature,
            power,
            milliwatts: Script::Unsupported,
            fail_on: None,
            reads: 0,
        }
    }

    pub fn with_milliwatts(mut self, milliwatts: Script) -> Self {
        self.milliwatts = milliwatts;
        self
    }

    pub fn failing_on_call(mut self, read: usize) -> Self {
        self.fail_on = Some(read);
        self
    }
}

impl GpuDevice for FakeGpuDevice {
    fn name(&self) -> &str {
        "Fake Radeon"
    }

    fn utilization(&mut self) -> Result<f64, GpuError> {
        // Utilization is read first, so it marks the start of a read
        self.reads += 1;
        if self.fail_on == Some(self.reads) {
            return Err(GpuError::Io {
                path: PathBuf::from("fake/gpu_busy_percent"),
                source: io::Error::new(io::ErrorKind::Other, "device lost"),
            });
        }
        self.utilization.play("utilization")
    }

    fn temperature(&mut self) -> Result<f64, GpuError> {
        self.temperature.play("temperature")
    }

    fn power_watts(&mut self) -> Result<f64, GpuError> {
        self.power.play("power (W)")
    }

    fn power_milliwatts(&mut self) -> Result<f64, GpuError> {
        self.milliwatts.play("power (mW)")
    }
}

/// CPU source cycling through fixed values
pub struct FakeCpu {
    values: Vec<f64>,
    window: Duration,
    next: usize,
}

impl FakeCpu {
    pub fn new(values: Vec<f64>, window: Duration) -> Self {
        Self {
            values,
            window,
            next: 0,
        }
    }
}

impl CpuSource for FakeCpu {
    fn sampling_window(&self) -> Duration {
        self.window
    }

    fn sample(&mut self) -> f64 {
        thread::sleep(self.window);
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
